use glam::DVec2;

use crate::params::ParameterSet;
use crate::surface::StrokeSurface;

const FULL_TURN_DEG: f64 = 360.0;
const HALF_TURN_DEG: f64 = 180.0;

/// A single wave segment, stored in the local frame of its rotation.
///
/// `local_a` and `local_b` mirror each other about the local vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSegment {
    /// Rotation of the local frame, in degrees.
    pub rotation_deg: f64,
    /// Inner sweep angle that produced this segment, in degrees.
    pub sweep_deg: f64,
    pub local_a: DVec2,
    pub local_b: DVec2,
}

impl WaveSegment {
    /// Endpoints in canvas coordinates (relative to the origin).
    pub fn world(&self) -> (DVec2, DVec2) {
        let rotation = DVec2::from_angle(self.rotation_deg.to_radians());
        (rotation.rotate(self.local_a), rotation.rotate(self.local_b))
    }
}

/// The single long-lived wave pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct WavePattern {
    length: f64,
    outer_step_deg: f64,
    inner_step_deg: f64,
}

impl WavePattern {
    pub fn from_params(params: &ParameterSet) -> Self {
        let mut wave = Self {
            length: 0.0,
            outer_step_deg: FULL_TURN_DEG,
            inner_step_deg: HALF_TURN_DEG,
        };
        wave.resync(params);
        wave
    }

    pub fn resync(&mut self, params: &ParameterSet) {
        self.length = params.line_length();
        self.outer_step_deg = params.line_outer_step_deg();
        self.inner_step_deg = params.line_inner_step_deg();
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn outer_step_deg(&self) -> f64 {
        self.outer_step_deg
    }

    pub fn inner_step_deg(&self) -> f64 {
        self.inner_step_deg
    }

    /// Number of segments one render produces.
    pub fn segment_count(&self) -> usize {
        sweep(self.outer_step_deg, FULL_TURN_DEG).count()
            * sweep(self.inner_step_deg, HALF_TURN_DEG).count()
    }

    /// All segments in draw order: outer rotation first, inner sweep second.
    pub fn segments(&self) -> Vec<WaveSegment> {
        let mut segments = Vec::with_capacity(self.segment_count());
        for rotation_deg in sweep(self.outer_step_deg, FULL_TURN_DEG) {
            for sweep_deg in sweep(self.inner_step_deg, HALF_TURN_DEG) {
                // sin(-r) = -sin(r), cos(-r) = cos(r): share one evaluation so the
                // mirror is exact.
                let (sin, cos) = sweep_deg.to_radians().sin_cos();
                segments.push(WaveSegment {
                    rotation_deg,
                    sweep_deg,
                    local_a: DVec2::new(sin * self.length, cos * self.length),
                    local_b: DVec2::new(-sin * self.length, cos * self.length),
                });
            }
        }
        segments
    }

    pub fn render<S: StrokeSurface + ?Sized>(&self, surface: &mut S) {
        surface.set_stroke_opacity(1.0);
        for segment in self.segments() {
            let (a, b) = segment.world();
            surface.draw_line(a.x, a.y, b.x, b.y);
        }
    }
}

/// Angles `0, step, 2*step, ...` strictly below `limit`.
///
/// Angles are computed by multiplication rather than accumulation so that
/// the count is always `ceil(limit / step)`. A non-positive step yields
/// nothing.
fn sweep(step: f64, limit: f64) -> impl Iterator<Item = f64> {
    let count = if step > 0.0 && step.is_finite() {
        (limit / step).ceil() as usize
    } else {
        0
    };
    (0..count).map(move |i| i as f64 * step).filter(move |&a| a < limit)
}
