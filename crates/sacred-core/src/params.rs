use rand::Rng;

use crate::display::{ControlRange, DisplayTier, TierProfile};
use crate::error::{Result, SacredError};
use crate::parameter::{BoundedParameter, ParamId, SetOutcome};

// Ranges shared by both display tiers.
pub const AXIS_COUNT: ControlRange = ControlRange::new(6.0, 1.0, 24.0);
pub const LINE_OUTER_STEP: ControlRange = ControlRange::new(30.0, 1.0, 360.0);
pub const LINE_INNER_STEP: ControlRange = ControlRange::new(30.0, 1.0, 180.0);
pub const STROKE_WIDTH: ControlRange = ControlRange::new(2.0, 1.0, 10.0);
pub const ANIMATION_SPEED: ControlRange = ControlRange::new(1.0, 0.0, 10.0);
pub const SPAWN_FREQUENCY: ControlRange = ControlRange::new(5.0, 1.0, 10.0);

/// The validated configuration driving all geometry.
///
/// Every control is a [`BoundedParameter`], so values are always inside their
/// declared range. The fade-out diameter is cached and recomputed whenever the
/// circle diameter ceiling or the display tier changes.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    tier: DisplayTier,
    controls: Vec<BoundedParameter>,
    overshoot_margin: f64,
    max_diameter: f64,
}

impl ParameterSet {
    pub fn new(tier: DisplayTier) -> Self {
        let profile = tier.profile();
        let controls = ParamId::ALL
            .iter()
            .map(|&id| {
                let range = range_for(profile, id);
                BoundedParameter::new(id, range.default, range.min, range.max)
            })
            .collect();

        let mut set = Self {
            tier,
            controls,
            overshoot_margin: profile.overshoot_margin,
            max_diameter: 0.0,
        };
        set.recompute_max_diameter();
        set
    }

    pub fn for_width(window_width: f64) -> Self {
        Self::new(DisplayTier::for_width(window_width))
    }

    pub fn tier(&self) -> DisplayTier {
        self.tier
    }

    pub fn param(&self, id: ParamId) -> &BoundedParameter {
        &self.controls[id as usize]
    }

    pub fn params(&self) -> &[BoundedParameter] {
        &self.controls
    }

    pub fn get(&self, id: ParamId) -> f64 {
        self.param(id).value
    }

    /// Clamping write. Never fails; the outcome says whether the value moved.
    pub fn set(&mut self, id: ParamId, value: f64) -> SetOutcome {
        self.controls[id as usize].set(value)
    }

    /// Strict write that rejects out-of-range values.
    pub fn try_set(&mut self, id: ParamId, value: f64) -> Result<SetOutcome> {
        self.controls[id as usize].try_set(value)
    }

    /// Replace a control's range. Changing the diameter ceiling moves the
    /// fade-out point with it.
    pub fn set_range(&mut self, id: ParamId, min: f64, max: f64) {
        let (min, max) = match id {
            // Positivity is required where a zero would stall or divide.
            ParamId::AxisCount
            | ParamId::LineOuterStep
            | ParamId::LineInnerStep
            | ParamId::StrokeWidth
            | ParamId::SpawnFrequency => (min.max(1.0), max.max(1.0)),
            _ => (min.max(0.0), max.max(0.0)),
        };
        self.controls[id as usize].set_range(min, max);
        if id == ParamId::CircleDiameter {
            self.recompute_max_diameter();
        }
    }

    /// Switch display tier: size-dependent ranges and the overshoot margin follow
    /// the new profile, current values are clamped into the new ranges.
    pub fn set_tier(&mut self, tier: DisplayTier) {
        if tier == self.tier {
            return;
        }
        log::info!("display tier {:?} -> {:?}", self.tier, tier);
        self.tier = tier;
        let profile = tier.profile();
        for id in [ParamId::BurstRadius, ParamId::CircleDiameter, ParamId::LineLength] {
            let range = range_for(profile, id);
            let control = &mut self.controls[id as usize];
            control.default_value = range.default;
            control.set_range(range.min, range.max);
        }
        self.overshoot_margin = profile.overshoot_margin;
        self.recompute_max_diameter();
    }

    /// Override the tier's overshoot margin until the next tier switch.
    pub fn set_overshoot_margin(&mut self, margin: f64) {
        self.overshoot_margin = if margin.is_finite() { margin.max(0.0) } else { 0.0 };
        self.recompute_max_diameter();
    }

    pub fn overshoot_margin(&self) -> f64 {
        self.overshoot_margin
    }

    pub fn reset_to_defaults(&mut self) {
        for control in self.controls.iter_mut() {
            control.reset_to_default();
        }
    }

    /// Set every control to a uniformly random value within its range.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for control in self.controls.iter_mut() {
            control.randomize(rng);
        }
        log::debug!("randomized parameters: {:?}", self.values());
    }

    pub fn values(&self) -> Vec<(ParamId, f64)> {
        self.controls.iter().map(|c| (c.id, c.value)).collect()
    }

    pub fn axis_count(&self) -> u32 {
        self.get(ParamId::AxisCount).max(1.0) as u32
    }

    pub fn burst_radius(&self) -> f64 {
        self.get(ParamId::BurstRadius)
    }

    pub fn circle_diameter(&self) -> f64 {
        self.get(ParamId::CircleDiameter)
    }

    pub fn line_length(&self) -> f64 {
        self.get(ParamId::LineLength)
    }

    pub fn line_outer_step_deg(&self) -> f64 {
        self.get(ParamId::LineOuterStep)
    }

    pub fn line_inner_step_deg(&self) -> f64 {
        self.get(ParamId::LineInnerStep)
    }

    pub fn stroke_width(&self) -> f64 {
        self.get(ParamId::StrokeWidth)
    }

    pub fn animation_speed(&self) -> f64 {
        self.get(ParamId::AnimationSpeed)
    }

    /// Time between spawns. The frequency slider runs the other way: its top
    /// position gives the shortest period.
    pub fn spawn_period_ms(&self) -> u64 {
        let slider = self.param(ParamId::SpawnFrequency);
        ((slider.max + 1.0 - slider.value).max(0.0) * 1000.0) as u64
    }

    /// Diameter at which an animated burst has fully faded out.
    pub fn max_diameter(&self) -> f64 {
        self.max_diameter
    }

    pub fn check_geometry(&self) -> Result<()> {
        if self.max_diameter <= 0.0 {
            return Err(SacredError::DegenerateGeometry { max_diameter: self.max_diameter });
        }
        Ok(())
    }

    fn recompute_max_diameter(&mut self) {
        let ceiling = self.param(ParamId::CircleDiameter).max;
        self.max_diameter = ceiling + self.overshoot_margin;
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::new(DisplayTier::Wide)
    }
}

fn range_for(profile: &TierProfile, id: ParamId) -> ControlRange {
    match id {
        ParamId::AxisCount => AXIS_COUNT,
        ParamId::BurstRadius => profile.burst_radius,
        ParamId::CircleDiameter => profile.circle_diameter,
        ParamId::LineLength => profile.line_length,
        ParamId::LineOuterStep => LINE_OUTER_STEP,
        ParamId::LineInnerStep => LINE_INNER_STEP,
        ParamId::StrokeWidth => STROKE_WIDTH,
        ParamId::AnimationSpeed => ANIMATION_SPEED,
        ParamId::SpawnFrequency => SPAWN_FREQUENCY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tier_defaults() {
        let compact = ParameterSet::new(DisplayTier::Compact);
        assert_eq!(compact.axis_count(), 6);
        assert_eq!(compact.burst_radius(), 100.0);
        assert_eq!(compact.line_length(), 130.0);
        assert_eq!(compact.circle_diameter(), 100.0);
        assert_eq!(compact.max_diameter(), 450.0);

        let wide = ParameterSet::new(DisplayTier::Wide);
        assert_eq!(wide.burst_radius(), 200.0);
        assert_eq!(wide.line_length(), 400.0);
        assert_eq!(wide.max_diameter(), 750.0);
    }

    #[test]
    fn test_for_width_picks_tier() {
        assert_eq!(ParameterSet::for_width(1024.0).tier(), DisplayTier::Compact);
        assert_eq!(ParameterSet::for_width(1920.0).tier(), DisplayTier::Wide);
    }

    #[test]
    fn test_spawn_period_is_inverse_of_slider() {
        let mut params = ParameterSet::default();
        params.set(ParamId::SpawnFrequency, 10.0);
        assert_eq!(params.spawn_period_ms(), 1000);
        params.set(ParamId::SpawnFrequency, 1.0);
        assert_eq!(params.spawn_period_ms(), 10_000);
    }

    #[test]
    fn test_zero_steps_are_clamped_positive() {
        let mut params = ParameterSet::default();
        assert!(params.set(ParamId::LineOuterStep, 0.0).was_clamped());
        assert!(params.set(ParamId::LineInnerStep, -3.0).was_clamped());
        assert!(params.set(ParamId::AxisCount, 0.0).was_clamped());
        assert_eq!(params.line_outer_step_deg(), 1.0);
        assert_eq!(params.line_inner_step_deg(), 1.0);
        assert_eq!(params.axis_count(), 1);
    }

    #[test]
    fn test_set_range_cannot_open_zero_step() {
        let mut params = ParameterSet::default();
        params.set_range(ParamId::LineInnerStep, 0.0, 90.0);
        assert_eq!(params.param(ParamId::LineInnerStep).min, 1.0);
    }

    #[test]
    fn test_max_diameter_follows_ceiling_and_tier() {
        let mut params = ParameterSet::new(DisplayTier::Compact);
        params.set_range(ParamId::CircleDiameter, 0.0, 400.0);
        assert_eq!(params.max_diameter(), 550.0);

        params.set_tier(DisplayTier::Wide);
        assert_eq!(params.max_diameter(), 750.0);
    }

    #[test]
    fn test_set_tier_clamps_values() {
        let mut params = ParameterSet::new(DisplayTier::Wide);
        params.set(ParamId::BurstRadius, 450.0);
        params.set_tier(DisplayTier::Compact);
        assert_eq!(params.burst_radius(), 200.0);
        assert_eq!(params.param(ParamId::BurstRadius).max, 200.0);
    }

    #[test]
    fn test_degenerate_geometry_reported() {
        let mut params = ParameterSet::default();
        assert!(params.check_geometry().is_ok());

        params.set_range(ParamId::CircleDiameter, 0.0, 0.0);
        assert_eq!(params.max_diameter(), 250.0);
        assert!(params.check_geometry().is_ok());

        params.set_overshoot_margin(0.0);
        assert_eq!(params.max_diameter(), 0.0);
        assert!(matches!(
            params.check_geometry(),
            Err(SacredError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_tier_switch_restores_overshoot() {
        let mut params = ParameterSet::new(DisplayTier::Compact);
        params.set_overshoot_margin(10.0);
        assert_eq!(params.max_diameter(), 310.0);
        params.set_tier(DisplayTier::Wide);
        assert_eq!(params.overshoot_margin(), 250.0);
    }

    #[test]
    fn test_randomize_stays_within_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut params = ParameterSet::default();
        for _ in 0..200 {
            params.randomize(&mut rng);
            for control in params.params() {
                assert!(
                    control.min <= control.value && control.value <= control.max,
                    "{} = {} outside [{}, {}]",
                    control.id.id(),
                    control.value,
                    control.min,
                    control.max
                );
            }
        }
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut params = ParameterSet::new(DisplayTier::Compact);
        params.set(ParamId::AxisCount, 12.0);
        params.set(ParamId::LineLength, 10.0);
        params.reset_to_defaults();
        assert_eq!(params.axis_count(), 6);
        assert_eq!(params.line_length(), 130.0);
    }
}
