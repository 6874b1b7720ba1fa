//! The render-loop context.
//!
//! [`Engine`] owns the parameter set, the scene and the animation clock, and
//! is the only thing a host needs to drive: feed it input changes between
//! frames and call [`Engine::tick`] once per display refresh.

use std::path::PathBuf;

use chrono::{DateTime, Local, TimeZone};
use rand::Rng;

use crate::clock::{AnimationClock, TickReport};
use crate::display::DisplayTier;
use crate::error::Result;
use crate::parameter::{ParamId, SetOutcome};
use crate::params::ParameterSet;
use crate::preset::PresetFile;
use crate::scene::Scene;
use crate::surface::{ExportFormat, FrameExporter, StrokeSurface};

#[derive(Debug)]
pub struct Engine {
    params: ParameterSet,
    scene: Scene,
    clock: AnimationClock,
    degenerate_reported: bool,
}

impl Engine {
    pub fn new(params: ParameterSet, animated: bool, now_ms: u64) -> Self {
        let scene = Scene::new(&params, animated);
        let mut clock = AnimationClock::new();
        clock.set_enabled(animated, now_ms);
        log::info!(
            "engine started: tier {:?}, animated {}, max diameter {}",
            params.tier(),
            animated,
            params.max_diameter()
        );
        Self { params, scene, clock, degenerate_reported: false }
    }

    /// Engine with tier defaults for a window of the given width.
    pub fn for_window(window_width: f64, animated: bool, now_ms: u64) -> Self {
        Self::new(ParameterSet::for_width(window_width), animated, now_ms)
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn is_animating(&self) -> bool {
        self.clock.is_running()
    }

    /// Write one control (clamped) and re-derive every instance.
    pub fn set_param(&mut self, id: ParamId, value: f64) -> SetOutcome {
        let outcome = self.params.set(id, value);
        self.scene.resync(&self.params);
        outcome
    }

    pub fn set_range(&mut self, id: ParamId, min: f64, max: f64) {
        self.params.set_range(id, min, max);
        self.scene.resync(&self.params);
    }

    /// Toggle animation. Stopping before a seed has grown hands it back to
    /// the circle diameter control so the static frame is not empty.
    pub fn set_animation(&mut self, enabled: bool, now_ms: u64) {
        self.clock.set_enabled(enabled, now_ms);
        if !enabled {
            self.scene.settle_seeded(&self.params);
        }
    }

    /// React to a window resize: switch display tier if the width crossed the
    /// threshold.
    pub fn set_display_width(&mut self, window_width: f64) {
        let tier = DisplayTier::for_width(window_width);
        if tier != self.params.tier() {
            self.params.set_tier(tier);
            self.scene.resync(&self.params);
        }
    }

    /// Give every control a uniformly random value and re-derive all instances.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.params.randomize(rng);
        self.scene.resync(&self.params);
    }

    /// Replace the parameter set wholesale (e.g. from a preset).
    pub fn replace_params(&mut self, params: ParameterSet) {
        self.params = params;
        self.scene.resync(&self.params);
    }

    /// Load a preset: its tier and values replace the current ones and the
    /// animation toggle follows the preset.
    pub fn apply_preset(&mut self, preset: &PresetFile, now_ms: u64) {
        self.replace_params(preset.to_params());
        self.set_animation(preset.animated, now_ms);
    }

    pub fn preset(&self) -> PresetFile {
        PresetFile::capture(&self.params, self.clock.is_running())
    }

    /// One display refresh: advance the animation, then draw the frame.
    pub fn tick<S: StrokeSurface + ?Sized>(&mut self, now_ms: u64, surface: &mut S) -> TickReport {
        self.scene.resync(&self.params);
        self.report_degenerate_geometry();
        let report = self.clock.tick(now_ms, &self.params, &mut self.scene);
        self.render(surface);
        report
    }

    /// Draw the current scene without advancing the animation.
    pub fn render<S: StrokeSurface + ?Sized>(&self, surface: &mut S) {
        self.scene.render_frame(&self.params, surface);
    }

    /// Save the current frame, named after the local time. Failures are
    /// logged and returned; the engine state is untouched either way.
    pub fn export<E: FrameExporter + ?Sized>(
        &self,
        exporter: &E,
        format: ExportFormat,
    ) -> Result<PathBuf> {
        let name = export_file_name(&Local::now());
        match exporter.export_frame(&name, format) {
            Ok(path) => {
                log::info!("exported frame to {}", path.display());
                Ok(path)
            }
            Err(err) => {
                log::error!("export of {name} failed: {err}");
                Err(err)
            }
        }
    }

    fn report_degenerate_geometry(&mut self) {
        if !self.clock.is_running() {
            return;
        }
        match self.params.check_geometry() {
            Err(err) if !self.degenerate_reported => {
                log::warn!("{err}; fading disabled");
                self.degenerate_reported = true;
            }
            Ok(()) => self.degenerate_reported = false,
            Err(_) => {}
        }
    }
}

/// Export file stem: `Export` followed by day, month, year, hour, minute and
/// second.
pub fn export_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("Export%d%m%Y%H%M%S").to_string()
}
