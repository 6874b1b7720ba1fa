use std::path::PathBuf;

use sacred_core::Rgb;

/// Options for the software raster surface.
#[derive(Debug, Clone)]
pub struct RasterSettings {
    /// Colour the frame is cleared to.
    pub background: Rgb,
    /// Draw strokes with a one-pixel coverage ramp instead of hard edges.
    pub antialias: bool,
    /// JPEG quality for exports. Range: 1..=100
    pub jpeg_quality: u8,
    /// Directory exported frames are written to.
    pub export_dir: PathBuf,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            background: Rgb::BLACK,
            antialias: true,
            jpeg_quality: 90,
            export_dir: PathBuf::from("."),
        }
    }
}
