use std::io;

/// Errors produced by the geometry engine and its collaborators.
///
/// None of these are fatal to the render loop. The engine clamps invalid
/// parameters and substitutes a full-opacity fade for degenerate geometry;
/// only strict entry points and the export/preset paths hand them back.
#[derive(Debug, thiserror::Error)]
pub enum SacredError {
    #[error("parameter '{id}' = {value} is outside [{min}, {max}]")]
    InvalidParameter {
        id: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: max diameter is {max_diameter}")]
    DegenerateGeometry { max_diameter: f64 },

    #[error("frame export failed: {0}")]
    ExportFailure(String),

    #[error("preset error: {0}")]
    Preset(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SacredError>;
