//! Error types for scalemax.

use thiserror::Error;

/// Result alias for scalemax operations.
pub type ScaleMaxResult<T> = std::result::Result<T, ScaleMaxError>;

/// Errors that can occur when building volumes or filtering candidates.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScaleMaxError {
    /// A volume dimension is zero or the element count overflows `usize`.
    #[error("invalid volume dimensions {rows}x{cols}x{levels}")]
    InvalidDimensions {
        rows: usize,
        cols: usize,
        levels: usize,
    },
    /// The backing buffer is shorter than the volume requires.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// An owned buffer is longer than the volume it should hold.
    #[error("buffer has {got} elements, expected exactly {expected}")]
    BufferLengthMismatch { expected: usize, got: usize },
    /// A layer passed to `Volume::from_layers` has the wrong element count.
    #[error("layer {layer} has {got} elements, expected {expected}")]
    LayerSizeMismatch {
        layer: usize,
        expected: usize,
        got: usize,
    },
    /// A candidate coordinate lies outside the volume.
    #[error(
        "candidate {index} at ({row}, {col}, {level}) is out of bounds for volume {rows}x{cols}x{levels}"
    )]
    CandidateOutOfBounds {
        index: usize,
        row: usize,
        col: usize,
        level: usize,
        rows: usize,
        cols: usize,
        levels: usize,
    },
    /// A strategy name could not be parsed.
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
}
