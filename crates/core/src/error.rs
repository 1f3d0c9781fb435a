//! Error types for the wavefield core.

use thiserror::Error;

/// Errors produced by simulation setup and buffer operations.
///
/// The per-tick kernel itself is a total function and never fails; every
/// variant here is reportable once, at construction or at an explicit
/// operation boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero (or their product overflowed) when
    /// creating a grid.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A world extent was zero, negative, or non-finite.
    #[error("invalid world extent: ({width}, {height}) must be positive and finite")]
    InvalidExtent { width: f64, height: f64 },

    /// Two grids had incompatible dimensions for a paired operation.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// A requested variant preset name was not recognized.
    #[error("unknown variant: {0}")]
    UnknownVariant(String),

    /// An I/O failure while writing a snapshot.
    #[error("i/o error: {0}")]
    Io(String),
}
