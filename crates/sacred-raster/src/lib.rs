pub mod exporter;
pub mod renderer;
pub mod settings;

pub use renderer::RasterSurface;
pub use settings::RasterSettings;
