use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SacredError};

/// The bounded controls exposed to the host input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamId {
    AxisCount,
    BurstRadius,
    CircleDiameter,
    LineLength,
    LineOuterStep,
    LineInnerStep,
    StrokeWidth,
    AnimationSpeed,
    SpawnFrequency,
}

impl ParamId {
    pub const ALL: [ParamId; 9] = [
        ParamId::AxisCount,
        ParamId::BurstRadius,
        ParamId::CircleDiameter,
        ParamId::LineLength,
        ParamId::LineOuterStep,
        ParamId::LineInnerStep,
        ParamId::StrokeWidth,
        ParamId::AnimationSpeed,
        ParamId::SpawnFrequency,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ParamId::AxisCount => "axisCount",
            ParamId::BurstRadius => "burstRadius",
            ParamId::CircleDiameter => "circleDiameter",
            ParamId::LineLength => "lineLength",
            ParamId::LineOuterStep => "lineOuterStep",
            ParamId::LineInnerStep => "lineInnerStep",
            ParamId::StrokeWidth => "strokeWidth",
            ParamId::AnimationSpeed => "animationSpeed",
            ParamId::SpawnFrequency => "spawnFrequency",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ParamId::AxisCount => "Axis",
            ParamId::BurstRadius => "Radius",
            ParamId::CircleDiameter => "Circle Diameter",
            ParamId::LineLength => "Line Length",
            ParamId::LineOuterStep => "Line Step",
            ParamId::LineInnerStep => "Line Gap",
            ParamId::StrokeWidth => "Stroke Weight",
            ParamId::AnimationSpeed => "Speed",
            ParamId::SpawnFrequency => "Frequency",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ParamId::AxisCount => "Number of circles repeated around the burst ring.",
            ParamId::BurstRadius => "Distance from the centre to each ringed circle.",
            ParamId::CircleDiameter => "Diameter of every circle in a static burst.",
            ParamId::LineLength => "Half-length scale of the wave segments.",
            ParamId::LineOuterStep => "Rotation in degrees between wave repetitions.",
            ParamId::LineInnerStep => "Sweep in degrees between segments of one wave.",
            ParamId::StrokeWidth => "Stroke width of every drawn primitive.",
            ParamId::AnimationSpeed => "Diameter growth per frame while animating.",
            ParamId::SpawnFrequency => "How often a new burst spawns while animating.",
        }
    }
}

/// Result of a clamping write to a [`BoundedParameter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetOutcome {
    Accepted(f64),
    Clamped { requested: f64, applied: f64 },
}

impl SetOutcome {
    pub fn value(&self) -> f64 {
        match *self {
            SetOutcome::Accepted(v) => v,
            SetOutcome::Clamped { applied, .. } => applied,
        }
    }

    pub fn was_clamped(&self) -> bool {
        matches!(self, SetOutcome::Clamped { .. })
    }
}

/// A single slider-backed control: value, inclusive range, default and step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundedParameter {
    pub id: ParamId,
    pub name: String,
    pub description: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub default_value: f64,
    pub step: f64,
}

impl BoundedParameter {
    pub fn new(id: ParamId, value: f64, min: f64, max: f64) -> Self {
        Self {
            id,
            name: id.name().to_string(),
            description: id.description().to_string(),
            value,
            min,
            max,
            default_value: value,
            step: 1.0,
        }
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Get the normalized value in [0, 1].
    pub fn normalized_value(&self) -> f64 {
        let (min, max) = self.bounds();
        if max == min {
            return 0.0;
        }
        ((self.value - min) / (max - min)).clamp(0.0, 1.0)
    }

    /// Set value from a normalized [0, 1] input.
    pub fn set_from_normalized(&mut self, normalized: f64) -> SetOutcome {
        let (min, max) = self.bounds();
        let clamped = if normalized.is_nan() { 0.0 } else { normalized.clamp(0.0, 1.0) };
        self.set(min + clamped * (max - min))
    }

    /// Write a value, clamping it into `[min, max]` and onto the step grid.
    ///
    /// Non-finite input never reaches the stored value: NaN lands on `min`,
    /// infinities on the nearest bound.
    pub fn set(&mut self, requested: f64) -> SetOutcome {
        let applied = self.conform(requested);
        self.value = applied;
        if requested == applied {
            SetOutcome::Accepted(applied)
        } else {
            let (min, max) = self.bounds();
            if requested >= min && requested <= max {
                log::debug!("{} = {} snapped to {}", self.id.id(), requested, applied);
            } else {
                log::warn!(
                    "{} = {} clamped to {} (range {}..={})",
                    self.id.id(),
                    requested,
                    applied,
                    self.min,
                    self.max
                );
            }
            SetOutcome::Clamped { requested, applied }
        }
    }

    /// Strict write: rejects anything outside `[min, max]` instead of clamping.
    ///
    /// An in-range value is still snapped onto the step grid; the returned
    /// outcome is `Clamped` when that moved it.
    pub fn try_set(&mut self, requested: f64) -> Result<SetOutcome> {
        let (min, max) = self.bounds();
        if !requested.is_finite() || requested < min || requested > max {
            return Err(SacredError::InvalidParameter {
                id: self.id.id(),
                value: requested,
                min,
                max,
            });
        }
        Ok(self.set(requested))
    }

    /// Replace the declared range, pulling the current and default values inside it.
    ///
    /// A non-finite bound keeps the previous one; inverted bounds are swapped.
    pub fn set_range(&mut self, min: f64, max: f64) {
        let keep = |new: f64, old: f64| if new.is_finite() { new } else { old };
        self.min = keep(min, self.min);
        self.max = keep(max, self.max);
        let (min, max) = self.bounds();
        self.min = min;
        self.max = max;
        self.default_value = self.conform(self.default_value);
        let current = self.value;
        self.set(current);
    }

    pub fn reset_to_default(&mut self) {
        self.value = self.conform(self.default_value);
    }

    /// Draw a uniformly random value from the step grid within `[min, max]`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let (min, max) = self.bounds();
        let slots = self.slot_count();
        let slot = rng.gen_range(0..=slots);
        self.value = (min + slot as f64 * self.step).min(max);
        self.value
    }

    /// The declared range in order. Inverted bounds (e.g. from a hand-edited
    /// file) are swapped; a NaN bound collapses onto the other one.
    fn bounds(&self) -> (f64, f64) {
        let min = self.min.min(self.max);
        let max = self.min.max(self.max);
        if min.is_nan() {
            (0.0, 0.0)
        } else {
            (min, max)
        }
    }

    fn slot_count(&self) -> u64 {
        let (min, max) = self.bounds();
        if self.step.is_nan() || self.step <= 0.0 || max <= min || !(max - min).is_finite() {
            return 0;
        }
        ((max - min) / self.step).floor() as u64
    }

    fn conform(&self, v: f64) -> f64 {
        let (min, max) = self.bounds();
        let v = if v.is_nan() { min } else { v };
        let clamped = v.clamp(min, max);
        if self.step.is_nan() || self.step <= 0.0 || !min.is_finite() {
            return clamped;
        }
        let snapped = min + ((clamped - min) / self.step).round() * self.step;
        if snapped.is_nan() {
            return clamped;
        }
        snapped.clamp(min, max)
    }
}
