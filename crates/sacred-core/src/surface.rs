use std::path::PathBuf;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An 8-bit RGB stroke colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

/// The host drawing surface.
///
/// All coordinates passed to the draw calls are relative to the origin last
/// set with [`StrokeSurface::set_origin`]. Circles are stroked outlines, never
/// filled.
pub trait StrokeSurface {
    /// Canvas size in pixels (width, height).
    fn size(&self) -> (f64, f64);

    fn clear_frame(&mut self);

    fn set_origin(&mut self, x: f64, y: f64);

    /// Opacity in [0, 1] applied to subsequent strokes.
    fn set_stroke_opacity(&mut self, alpha: f64);

    fn set_stroke_width(&mut self, width: f64);

    fn set_stroke_color(&mut self, color: Rgb);

    fn draw_circle(&mut self, center_x: f64, center_y: f64, diameter: f64);

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
}

/// Raster formats a frame can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Jpeg,
    Png,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
        }
    }
}

/// A surface that can save its current frame as a raster image.
pub trait FrameExporter {
    /// Save the current frame under `name` (without extension) and return the
    /// written path.
    fn export_frame(&self, name: &str, format: ExportFormat) -> Result<PathBuf>;
}

/// One recorded surface call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    Origin(DVec2),
    Opacity(f64),
    StrokeWidth(f64),
    StrokeColor(Rgb),
    Circle { center: DVec2, diameter: f64 },
    Line { from: DVec2, to: DVec2 },
}

/// A [`StrokeSurface`] that records every call instead of drawing.
///
/// Useful for hosts that replay frames on their own canvas, and for checking
/// exactly which primitives a frame produced.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop everything recorded so far.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = (DVec2, f64)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Circle { center, diameter } => Some((center, diameter)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Line { from, to } => Some((from, to)),
            _ => None,
        })
    }

    /// Replay the recorded calls onto another surface.
    pub fn replay(&self, target: &mut dyn StrokeSurface) {
        for command in &self.commands {
            match *command {
                DrawCommand::Clear => target.clear_frame(),
                DrawCommand::Origin(o) => target.set_origin(o.x, o.y),
                DrawCommand::Opacity(a) => target.set_stroke_opacity(a),
                DrawCommand::StrokeWidth(w) => target.set_stroke_width(w),
                DrawCommand::StrokeColor(c) => target.set_stroke_color(c),
                DrawCommand::Circle { center, diameter } => {
                    target.draw_circle(center.x, center.y, diameter)
                }
                DrawCommand::Line { from, to } => target.draw_line(from.x, from.y, to.x, to.y),
            }
        }
    }
}

impl StrokeSurface for DisplayList {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    // A cleared frame starts a fresh recording.
    fn clear_frame(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn set_origin(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Origin(DVec2::new(x, y)));
    }

    fn set_stroke_opacity(&mut self, alpha: f64) {
        self.commands.push(DrawCommand::Opacity(alpha));
    }

    fn set_stroke_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::StrokeWidth(width));
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::StrokeColor(color));
    }

    fn draw_circle(&mut self, center_x: f64, center_y: f64, diameter: f64) {
        self.commands.push(DrawCommand::Circle {
            center: DVec2::new(center_x, center_y),
            diameter,
        });
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.commands.push(DrawCommand::Line {
            from: DVec2::new(x1, y1),
            to: DVec2::new(x2, y2),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_starts_new_recording() {
        let mut list = DisplayList::new(100.0, 100.0);
        list.draw_circle(0.0, 0.0, 10.0);
        list.clear_frame();
        list.draw_line(0.0, 0.0, 1.0, 1.0);
        assert_eq!(list.commands().len(), 2);
        assert_eq!(list.circles().count(), 0);
        assert_eq!(list.lines().count(), 1);
    }

    #[test]
    fn test_replay_reproduces_commands() {
        let mut source = DisplayList::new(10.0, 20.0);
        source.clear_frame();
        source.set_origin(5.0, 10.0);
        source.set_stroke_opacity(0.5);
        source.draw_circle(1.0, 2.0, 3.0);

        let mut target = DisplayList::new(10.0, 20.0);
        source.replay(&mut target);
        assert_eq!(source.commands(), target.commands());
    }

    #[test]
    fn test_export_extension() {
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
        assert_eq!(ExportFormat::Png.extension(), "png");
    }
}
