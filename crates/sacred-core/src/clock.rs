use crate::params::ParameterSet;
use crate::radial::RadialBurst;
use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockState {
    #[default]
    Idle,
    Running {
        /// Time of the last spawn (or of enabling), in milliseconds.
        baseline_ms: u64,
    },
}

/// What one tick did to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub spawned: bool,
    pub retired: usize,
}

/// Drives the spawn/grow/retire lifecycle of animated bursts.
///
/// While idle, ticks leave the scene alone and existing bursts freeze at their
/// current diameter.
#[derive(Debug, Clone, Default)]
pub struct AnimationClock {
    state: ClockState,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }

    /// Idle -> Running. The spawn timer starts counting from `now_ms`.
    pub fn enable(&mut self, now_ms: u64) {
        if !self.is_running() {
            log::debug!("animation enabled at {now_ms} ms");
            self.state = ClockState::Running { baseline_ms: now_ms };
        }
    }

    /// Running -> Idle. Live bursts are kept.
    pub fn disable(&mut self) {
        if self.is_running() {
            log::debug!("animation disabled");
            self.state = ClockState::Idle;
        }
    }

    pub fn set_enabled(&mut self, enabled: bool, now_ms: u64) {
        if enabled {
            self.enable(now_ms);
        } else {
            self.disable();
        }
    }

    /// Advance the animation by one frame.
    ///
    /// Order within a tick: spawn check, then growth of every burst, then
    /// removal of expired bursts in a separate pass. Spawning is suspended
    /// while the animation speed is zero; the baseline is kept, so the next
    /// burst arrives on the first tick after the speed is raised.
    pub fn tick(&mut self, now_ms: u64, params: &ParameterSet, scene: &mut Scene) -> TickReport {
        let ClockState::Running { baseline_ms } = self.state else {
            return TickReport::default();
        };

        let mut report = TickReport::default();
        let speed = params.animation_speed();
        // Bursts can't grow or retire at zero speed; spawning would only pile
        // up invisible zero-diameter bursts.
        if speed > 0.0 && now_ms >= baseline_ms.saturating_add(params.spawn_period_ms()) {
            scene.push(RadialBurst::spawned(params));
            self.state = ClockState::Running { baseline_ms: now_ms };
            report.spawned = true;
            log::debug!("spawned burst at {now_ms} ms ({} live)", scene.len());
        }

        scene.grow_all(speed);

        report.retired = scene.retire_expired(params.max_diameter());
        if report.retired > 0 {
            log::debug!("retired {} burst(s), {} live", report.retired, scene.len());
        }
        report
    }
}
