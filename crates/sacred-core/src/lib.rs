pub mod error;
pub mod parameter;
pub mod display;
pub mod params;
pub mod surface;
pub mod radial;
pub mod wave;
pub mod scene;
pub mod clock;
pub mod engine;
pub mod preset;

pub use error::{Result, SacredError};
pub use parameter::{BoundedParameter, ParamId, SetOutcome};
pub use display::{canvas_size, DisplayTier, TierProfile, DISPLAY_TIERS};
pub use params::ParameterSet;
pub use surface::{DisplayList, DrawCommand, ExportFormat, FrameExporter, Rgb, StrokeSurface};
pub use radial::{fade_alpha, RadialBurst};
pub use wave::{WavePattern, WaveSegment};
pub use scene::Scene;
pub use clock::{AnimationClock, ClockState, TickReport};
pub use engine::{export_file_name, Engine};
pub use preset::{load_preset, save_preset, PresetFile};
