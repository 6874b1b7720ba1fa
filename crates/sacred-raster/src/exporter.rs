use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use sacred_core::{ExportFormat, FrameExporter, SacredError};

use crate::renderer::RasterSurface;

impl FrameExporter for RasterSurface {
    /// Write the current frame to `<export_dir>/<name>.<ext>`.
    fn export_frame(&self, name: &str, format: ExportFormat) -> sacred_core::Result<PathBuf> {
        let dir = &self.settings.export_dir;
        std::fs::create_dir_all(dir)
            .map_err(|e| SacredError::ExportFailure(format!("{}: {e}", dir.display())))?;
        let path = dir.join(format!("{name}.{}", format.extension()));

        match format {
            ExportFormat::Jpeg => {
                // JPEG has no alpha channel.
                let rgb = DynamicImage::ImageRgba8(self.image().clone()).to_rgb8();
                let file = File::create(&path).map_err(|e| {
                    SacredError::ExportFailure(format!("{}: {e}", path.display()))
                })?;
                let quality = self.settings.jpeg_quality.clamp(1, 100);
                JpegEncoder::new_with_quality(BufWriter::new(file), quality)
                    .encode_image(&rgb)
                    .map_err(|e| SacredError::ExportFailure(e.to_string()))?;
            }
            ExportFormat::Png => {
                self.image()
                    .save_with_format(&path, ImageFormat::Png)
                    .map_err(|e| SacredError::ExportFailure(e.to_string()))?;
            }
        }

        log::debug!(
            "wrote {}x{} frame to {}",
            self.image().width(),
            self.image().height(),
            path.display()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RasterSettings;
    use sacred_core::StrokeSurface;

    fn export_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sacred-raster-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_png_export_preserves_pixels() {
        let dir = export_dir("png");
        let settings = RasterSettings { export_dir: dir.clone(), ..Default::default() };
        let mut surface = RasterSurface::new(16, 16, settings);
        surface.set_stroke_width(2.0);
        surface.draw_line(0.0, 8.0, 16.0, 8.0);

        let path = surface.export_frame("frame", ExportFormat::Png).unwrap();
        assert_eq!(path, dir.join("frame.png"));
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(&loaded, surface.image());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_jpeg_export_is_opaque_rgb() {
        let dir = export_dir("jpeg");
        let settings = RasterSettings { export_dir: dir.clone(), ..Default::default() };
        let surface = RasterSurface::new(24, 10, settings);

        let path = surface.export_frame("frame", ExportFormat::Jpeg).unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("jpg"));
        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (24, 10));
        assert!(!loaded.color().has_alpha());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unwritable_directory_reports_failure() {
        let blocker = export_dir("blocker");
        std::fs::write(&blocker, b"file, not a directory").unwrap();
        let settings = RasterSettings { export_dir: blocker.join("sub"), ..Default::default() };
        let surface = RasterSurface::new(4, 4, settings);

        let err = surface.export_frame("frame", ExportFormat::Png).unwrap_err();
        assert!(matches!(err, SacredError::ExportFailure(_)));
        let _ = std::fs::remove_file(&blocker);
    }
}
