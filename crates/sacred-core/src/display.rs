//! Display-size tiers.
//!
//! The host window width selects one of two named profiles. Each profile
//! carries the default values and ranges of the size-dependent controls and
//! the overshoot margin that places the fade-out point past the diameter
//! ceiling.

use serde::{Deserialize, Serialize};

/// Widest window (in logical pixels) still served by the compact tier.
pub const COMPACT_MAX_WIDTH: f64 = 1280.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayTier {
    Compact,
    Wide,
}

/// Default value and inclusive range of one control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRange {
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

impl ControlRange {
    pub const fn new(default: f64, min: f64, max: f64) -> Self {
        Self { default, min, max }
    }
}

/// How the canvas height is derived from the window height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasHeight {
    Half,
    Inset(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierProfile {
    pub tier: DisplayTier,
    pub burst_radius: ControlRange,
    pub circle_diameter: ControlRange,
    pub line_length: ControlRange,
    /// Added to the circle diameter ceiling to get the fade-out diameter.
    pub overshoot_margin: f64,
    pub canvas_height: CanvasHeight,
}

pub const DISPLAY_TIERS: [TierProfile; 2] = [
    TierProfile {
        tier: DisplayTier::Compact,
        burst_radius: ControlRange::new(100.0, 0.0, 200.0),
        circle_diameter: ControlRange::new(100.0, 0.0, 300.0),
        line_length: ControlRange::new(130.0, 0.0, 200.0),
        overshoot_margin: 150.0,
        canvas_height: CanvasHeight::Half,
    },
    TierProfile {
        tier: DisplayTier::Wide,
        burst_radius: ControlRange::new(200.0, 0.0, 500.0),
        circle_diameter: ControlRange::new(100.0, 0.0, 500.0),
        line_length: ControlRange::new(400.0, 0.0, 500.0),
        overshoot_margin: 250.0,
        canvas_height: CanvasHeight::Inset(100.0),
    },
];

impl DisplayTier {
    pub fn for_width(width: f64) -> Self {
        if width <= COMPACT_MAX_WIDTH {
            DisplayTier::Compact
        } else {
            DisplayTier::Wide
        }
    }

    pub fn profile(&self) -> &'static TierProfile {
        match self {
            DisplayTier::Compact => &DISPLAY_TIERS[0],
            DisplayTier::Wide => &DISPLAY_TIERS[1],
        }
    }
}

impl TierProfile {
    /// Canvas dimensions for a window of the given size.
    pub fn canvas_size(&self, window_width: f64, window_height: f64) -> (f64, f64) {
        let height = match self.canvas_height {
            CanvasHeight::Half => window_height / 2.0,
            CanvasHeight::Inset(inset) => (window_height - inset).max(0.0),
        };
        (window_width.max(0.0), height)
    }
}

/// Canvas dimensions for a window, using the tier its width selects.
pub fn canvas_size(window_width: f64, window_height: f64) -> (f64, f64) {
    DisplayTier::for_width(window_width)
        .profile()
        .canvas_size(window_width, window_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive_for_compact() {
        assert_eq!(DisplayTier::for_width(1280.0), DisplayTier::Compact);
        assert_eq!(DisplayTier::for_width(1281.0), DisplayTier::Wide);
        assert_eq!(DisplayTier::for_width(320.0), DisplayTier::Compact);
    }

    #[test]
    fn test_table_is_keyed_by_tier() {
        for profile in &DISPLAY_TIERS {
            assert_eq!(profile.tier.profile(), profile);
        }
    }

    #[test]
    fn test_tier_overshoot() {
        assert_eq!(DisplayTier::Compact.profile().overshoot_margin, 150.0);
        assert_eq!(DisplayTier::Wide.profile().overshoot_margin, 250.0);
    }

    #[test]
    fn test_canvas_size_policy() {
        assert_eq!(canvas_size(1000.0, 800.0), (1000.0, 400.0));
        assert_eq!(canvas_size(1920.0, 1080.0), (1920.0, 980.0));
        assert_eq!(canvas_size(1920.0, 50.0), (1920.0, 0.0));
    }

    #[test]
    fn test_defaults_within_ranges() {
        for profile in &DISPLAY_TIERS {
            for range in [profile.burst_radius, profile.circle_diameter, profile.line_length] {
                assert!(range.min <= range.default && range.default <= range.max);
            }
        }
    }
}
