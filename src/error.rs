//! Error types for layout optimization.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Sheet axis, used to report which dimension a shape does not fit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal (width).
    X,
    /// Vertical (height).
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "width"),
            Axis::Y => write!(f, "height"),
        }
    }
}

/// Errors raised before an optimization run starts.
///
/// A run either completes all of its iterations or fails with one of these
/// before any particle is created.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Invalid optimizer parameters (particle count, iterations, coefficients).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The sheet has a non-positive or non-finite dimension.
    #[error("invalid sheet {width} x {height}: dimensions must be positive and finite")]
    InvalidSheet { width: f64, height: f64 },

    /// A shape has invalid or missing dimensions.
    #[error("invalid shape at index {index}: {reason}")]
    InvalidShape { index: usize, reason: String },

    /// A shape is larger than the sheet, so no in-bounds placement exists.
    #[error("shape at index {index} does not fit: {axis} {extent} exceeds sheet {axis} {limit}")]
    ShapeDoesNotFit {
        index: usize,
        axis: Axis,
        extent: f64,
        limit: f64,
    },

    /// A shape record carries a type tag that is not recognized.
    #[error("unknown shape type `{tag}` at index {index}")]
    UnknownShapeType { index: usize, tag: String },
}

impl Error {
    /// Returns `true` for configuration errors (everything except an
    /// unrecognized shape type tag).
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::UnknownShapeType { .. })
    }
}
