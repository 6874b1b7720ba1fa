use glam::DVec2;
use image::{Rgba, RgbaImage};
use sacred_core::{Rgb, StrokeSurface};

use crate::settings::RasterSettings;

/// A CPU stroke renderer drawing into an RGBA image.
///
/// Strokes are blended source-over onto the current frame with the stroke
/// opacity as coverage. The y axis points down, as on a canvas.
pub struct RasterSurface {
    image: RgbaImage,
    pub(crate) settings: RasterSettings,
    origin: DVec2,
    stroke: Rgb,
    opacity: f64,
    stroke_width: f64,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, settings: RasterSettings) -> Self {
        let background = to_rgba(settings.background);
        Self {
            image: RgbaImage::from_pixel(width, height, background),
            settings,
            origin: DVec2::ZERO,
            stroke: Rgb::WHITE,
            opacity: 1.0,
            stroke_width: 1.0,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn settings(&self) -> &RasterSettings {
        &self.settings
    }

    /// Reallocate the frame for a new canvas size. The content is cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != self.image.dimensions() {
            log::debug!("raster surface resized to {width}x{height}");
            self.image = RgbaImage::from_pixel(width, height, to_rgba(self.settings.background));
        }
    }

    /// Visit every pixel near a stroke. `distance` gives the distance from a
    /// pixel centre to the stroke's centre line.
    fn stroke_region(&mut self, min: DVec2, max: DVec2, distance: impl Fn(DVec2) -> f64) {
        if self.opacity <= 0.0 || !min.is_finite() || !max.is_finite() {
            return;
        }
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        let half_width = self.stroke_width / 2.0;
        let pad = half_width + 1.0;
        let x0 = (min.x - pad).floor().max(0.0) as u32;
        let y0 = (min.y - pad).floor().max(0.0) as u32;
        let x1 = (max.x + pad).ceil().min(width as f64 - 1.0);
        let y1 = (max.y + pad).ceil().min(height as f64 - 1.0);
        if x1 < 0.0 || y1 < 0.0 {
            return;
        }
        let (x1, y1) = (x1 as u32, y1 as u32);

        let color = self.stroke;
        let antialias = self.settings.antialias;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let centre = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let d = distance(centre);
                let coverage = if antialias {
                    (half_width + 0.5 - d).clamp(0.0, 1.0)
                } else if d <= half_width {
                    1.0
                } else {
                    0.0
                };
                if coverage > 0.0 {
                    blend(self.image.get_pixel_mut(x, y), color, coverage * self.opacity);
                }
            }
        }
    }
}

impl StrokeSurface for RasterSurface {
    fn size(&self) -> (f64, f64) {
        let (w, h) = self.image.dimensions();
        (w as f64, h as f64)
    }

    fn clear_frame(&mut self) {
        let background = to_rgba(self.settings.background);
        for pixel in self.image.pixels_mut() {
            *pixel = background;
        }
        self.origin = DVec2::ZERO;
    }

    fn set_origin(&mut self, x: f64, y: f64) {
        self.origin = DVec2::new(x, y);
    }

    fn set_stroke_opacity(&mut self, alpha: f64) {
        self.opacity = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    }

    fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = if width.is_finite() { width.max(0.0) } else { 1.0 };
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.stroke = color;
    }

    fn draw_circle(&mut self, center_x: f64, center_y: f64, diameter: f64) {
        let center = self.origin + DVec2::new(center_x, center_y);
        let radius = diameter.abs() / 2.0;
        let extent = DVec2::splat(radius);
        self.stroke_region(center - extent, center + extent, |p| {
            (p.distance(center) - radius).abs()
        });
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let a = self.origin + DVec2::new(x1, y1);
        let b = self.origin + DVec2::new(x2, y2);
        self.stroke_region(a.min(b), a.max(b), |p| segment_distance(p, a, b));
    }
}

fn segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn to_rgba(color: Rgb) -> Rgba<u8> {
    Rgba([color.0, color.1, color.2, 255])
}

/// Source-over blend of `color` at `alpha` onto an opaque pixel.
fn blend(pixel: &mut Rgba<u8>, color: Rgb, alpha: f64) {
    let mix = |dst: u8, src: u8| -> u8 {
        (src as f64 * alpha + dst as f64 * (1.0 - alpha)).round().clamp(0.0, 255.0) as u8
    };
    let [r, g, b, _] = pixel.0;
    *pixel = Rgba([mix(r, color.0), mix(g, color.1), mix(b, color.2), 255]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(width: u32, height: u32) -> RasterSurface {
        RasterSurface::new(width, height, RasterSettings::default())
    }

    #[test]
    fn test_clear_fills_background() {
        let mut s = surface(8, 8);
        s.draw_line(0.0, 4.0, 8.0, 4.0);
        s.clear_frame();
        assert!(s.image().pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_line_lights_pixels_on_its_path() {
        let mut s = surface(20, 20);
        s.set_stroke_width(2.0);
        s.draw_line(2.0, 10.0, 18.0, 10.0);
        assert_eq!(s.image().get_pixel(10, 10).0[0], 255);
        assert_eq!(s.image().get_pixel(10, 2).0[0], 0);
    }

    #[test]
    fn test_origin_offsets_drawing() {
        let mut s = surface(40, 40);
        s.set_origin(20.0, 20.0);
        s.set_stroke_width(2.0);
        s.draw_circle(0.0, 0.0, 20.0);
        // Ring of radius 10 around the centre: (30, 20) is on it, the centre is not.
        assert!(s.image().get_pixel(29, 20).0[0] > 128);
        assert_eq!(s.image().get_pixel(20, 20).0[0], 0);
    }

    #[test]
    fn test_opacity_scales_intensity() {
        let mut s = surface(20, 20);
        s.set_stroke_width(4.0);
        s.set_stroke_opacity(0.5);
        s.draw_line(0.0, 10.0, 20.0, 10.0);
        let value = s.image().get_pixel(10, 10).0[0];
        assert!((126..=129).contains(&value), "got {value}");

        s.clear_frame();
        s.set_stroke_opacity(0.0);
        s.draw_line(0.0, 10.0, 20.0, 10.0);
        assert_eq!(s.image().get_pixel(10, 10).0[0], 0);
    }

    #[test]
    fn test_offscreen_and_non_finite_strokes_are_ignored() {
        let mut s = surface(10, 10);
        s.draw_line(-100.0, -100.0, -50.0, -50.0);
        s.draw_circle(f64::NAN, 0.0, 10.0);
        s.draw_line(0.0, 0.0, f64::INFINITY, 5.0);
        assert!(s.image().pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut s = surface(10, 10);
        s.resize(30, 12);
        assert_eq!(s.size(), (30.0, 12.0));
    }

    #[test]
    fn test_segment_distance() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(10.0, 0.0);
        assert_eq!(segment_distance(DVec2::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(segment_distance(DVec2::new(-4.0, 3.0), a, b), 5.0);
        assert_eq!(segment_distance(DVec2::new(1.0, 1.0), a, a), 2f64.sqrt());
    }
}
