//! Error types for chart construction and plot preparation.
//!
//! Only caller mistakes surface as errors. Configuration that simply yields
//! nothing to draw (non-positive tick spacing, inverted tick range) and
//! degenerate numeric states (zero-width axis, zero zoom ratio) are guarded
//! silently where they occur.

use std::fmt;

/// Which of the two plot dimensions an axis belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisKind {
    X,
    Y,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisKind::X => write!(f, "x"),
            AxisKind::Y => write!(f, "y"),
        }
    }
}

/// Invalid contour input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContourError {
    #[error("contour matrix has no cells")]
    Empty,

    #[error("contour row {row} has {len} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("contour value at row {row}, column {col} is not finite")]
    NonFinite { row: usize, col: usize },

    #[error("contour {axis} range [{min}, {max}] is empty or inverted")]
    InvalidRange { axis: AxisKind, min: f64, max: f64 },

    #[error("contour matrix declared {rows}x{cols} but holds {actual} values")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        actual: usize,
    },

    #[error("contour matrix is {rows}x{cols}, exceeding the raster limit of {limit} cells per side")]
    TooLarge {
        rows: usize,
        cols: usize,
        limit: usize,
    },
}

/// Errors surfaced by the chart engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("logarithmic {axis} axis requires positive bounds, got [{min}, {max}]")]
    NonPositiveLogBound { axis: AxisKind, min: f64, max: f64 },

    #[error("{axis} axis bounds must be finite, got [{min}, {max}]")]
    NonFiniteBound { axis: AxisKind, min: f64, max: f64 },

    #[error("no {axis} axis with index {index}")]
    UnknownAxis { axis: AxisKind, index: usize },

    #[error("unsupported tick label format {format:?}, expected %g, %.Nf or %.Ne")]
    InvalidTickFormat { format: String },

    #[error("malformed contour: {0}")]
    Contour(#[from] ContourError),
}

pub type GraphResult<T> = Result<T, GraphError>;
