use std::f64::consts::TAU;

use glam::DVec2;

use crate::params::ParameterSet;
use crate::surface::StrokeSurface;

/// Where a burst's diameter comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiameterMode {
    /// Follows the circle diameter control; static bursts stay here until they
    /// are first grown.
    Tracking,
    /// Spawned at diameter zero and waiting for its first growth step.
    Seeded,
    /// Owned by the animation clock and never re-derived.
    Growing,
}

/// One radial burst: a centred circle plus `axis_count` circles on a ring,
/// all sharing one diameter.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialBurst {
    axis_count: u32,
    angular_step: f64,
    burst_radius: f64,
    diameter: f64,
    mode: DiameterMode,
}

impl RadialBurst {
    /// A static burst drawn at the configured circle diameter.
    pub fn from_params(params: &ParameterSet) -> Self {
        let mut burst = Self {
            axis_count: 1,
            angular_step: TAU,
            burst_radius: 0.0,
            diameter: params.circle_diameter(),
            mode: DiameterMode::Tracking,
        };
        burst.resync(params);
        burst
    }

    /// A burst seeded at diameter zero, as spawned by the animation clock.
    pub fn spawned(params: &ParameterSet) -> Self {
        let mut burst = Self::from_params(params);
        burst.diameter = 0.0;
        burst.mode = DiameterMode::Seeded;
        burst
    }

    /// Hand a seeded burst that never grew back to the diameter control.
    /// Grown bursts are left alone.
    pub fn settle(&mut self, params: &ParameterSet) {
        if self.mode == DiameterMode::Seeded {
            self.mode = DiameterMode::Tracking;
            self.resync(params);
        }
    }

    /// Re-derive geometry from the current parameters. Only a tracking burst
    /// picks up the diameter control.
    pub fn resync(&mut self, params: &ParameterSet) {
        self.axis_count = params.axis_count().max(1);
        self.angular_step = TAU / self.axis_count as f64;
        self.burst_radius = params.burst_radius();
        if self.mode == DiameterMode::Tracking {
            self.diameter = params.circle_diameter();
        }
    }

    pub fn grow(&mut self, speed: f64) {
        self.mode = DiameterMode::Growing;
        self.diameter += speed;
    }

    pub fn is_expired(&self, max_diameter: f64) -> bool {
        self.diameter >= max_diameter
    }

    pub fn axis_count(&self) -> u32 {
        self.axis_count
    }

    pub fn angular_step(&self) -> f64 {
        self.angular_step
    }

    pub fn burst_radius(&self) -> f64 {
        self.burst_radius
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn mode(&self) -> DiameterMode {
        self.mode
    }

    /// Ring angle of each repeated circle, in draw order.
    pub fn ring_angles(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.axis_count).map(move |k| k as f64 * self.angular_step)
    }

    /// Centres of the ringed circles (polar to Cartesian), in draw order.
    pub fn ring_centers(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.ring_angles()
            .map(move |theta| DVec2::from_angle(theta) * self.burst_radius)
    }

    /// Draw the centred circle, then the ring in increasing angle.
    pub fn render<S: StrokeSurface + ?Sized>(&self, max_diameter: f64, surface: &mut S) {
        surface.set_stroke_opacity(fade_alpha(self.diameter, max_diameter));
        surface.draw_circle(0.0, 0.0, self.diameter);
        for center in self.ring_centers() {
            surface.draw_circle(center.x, center.y, self.diameter);
        }
    }
}

/// Stroke opacity of a burst: fully opaque at zero diameter, transparent at
/// `max_diameter`. A non-positive `max_diameter` disables the fade.
pub fn fade_alpha(diameter: f64, max_diameter: f64) -> f64 {
    if max_diameter <= 0.0 {
        return 1.0;
    }
    (1.0 - diameter / max_diameter).clamp(0.0, 1.0)
}
