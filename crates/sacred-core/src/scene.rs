use crate::params::ParameterSet;
use crate::radial::RadialBurst;
use crate::surface::{Rgb, StrokeSurface};
use crate::wave::WavePattern;

/// Stroke colour of every primitive.
pub const STROKE_COLOR: Rgb = Rgb::WHITE;

/// The live pattern instances, in draw order.
///
/// Bursts render back-to-front in insertion order; the single wave pattern is
/// drawn last, on top.
#[derive(Debug, Clone)]
pub struct Scene {
    bursts: Vec<RadialBurst>,
    wave: WavePattern,
}

impl Scene {
    /// A scene with one seed burst and the wave pattern. The seed starts at
    /// diameter zero when the scene is about to animate.
    pub fn new(params: &ParameterSet, animated: bool) -> Self {
        let seed = if animated {
            RadialBurst::spawned(params)
        } else {
            RadialBurst::from_params(params)
        };
        Self {
            bursts: vec![seed],
            wave: WavePattern::from_params(params),
        }
    }

    pub fn bursts(&self) -> &[RadialBurst] {
        &self.bursts
    }

    pub fn wave(&self) -> &WavePattern {
        &self.wave
    }

    pub fn len(&self) -> usize {
        self.bursts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bursts.is_empty()
    }

    pub fn push(&mut self, burst: RadialBurst) {
        self.bursts.push(burst);
    }

    /// Return seeded bursts that never grew to the diameter control.
    pub fn settle_seeded(&mut self, params: &ParameterSet) {
        for burst in self.bursts.iter_mut() {
            burst.settle(params);
        }
    }

    /// Grow every burst by `speed`.
    pub fn grow_all(&mut self, speed: f64) {
        for burst in self.bursts.iter_mut() {
            burst.grow(speed);
        }
    }

    /// Remove every burst at or past `max_diameter`, keeping the rest in
    /// order. Returns how many were removed.
    pub fn retire_expired(&mut self, max_diameter: f64) -> usize {
        let before = self.bursts.len();
        self.bursts.retain(|burst| !burst.is_expired(max_diameter));
        before - self.bursts.len()
    }

    /// Re-derive every instance's geometry from the current parameters.
    pub fn resync(&mut self, params: &ParameterSet) {
        for burst in self.bursts.iter_mut() {
            burst.resync(params);
        }
        self.wave.resync(params);
    }

    /// Draw one complete frame.
    pub fn render_frame<S: StrokeSurface + ?Sized>(&self, params: &ParameterSet, surface: &mut S) {
        surface.clear_frame();
        let (width, height) = surface.size();
        surface.set_origin(width / 2.0, height / 2.0);
        surface.set_stroke_color(STROKE_COLOR);
        surface.set_stroke_width(params.stroke_width());

        let max_diameter = params.max_diameter();
        for burst in &self.bursts {
            burst.render(max_diameter, surface);
        }
        self.wave.render(surface);
    }
}
