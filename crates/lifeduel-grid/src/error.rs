//! Error types for the `lifeduel-grid` crate.
//!
//! All fallible operations in this crate return [`GridError`] through the
//! standard [`Result`] type alias.

/// Errors that can occur during grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A coordinate lies outside the grid. Never clamped.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid height.
        rows: usize,
        /// Grid width.
        cols: usize,
    },

    /// A grid must have at least one row and one column, and its cell
    /// count must fit in memory.
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions {
        /// Requested height.
        rows: usize,
        /// Requested width.
        cols: usize,
    },

    /// An ASCII pattern could not be parsed.
    #[error("invalid pattern at line {line}: {reason}")]
    InvalidPattern {
        /// Zero-based pattern line.
        line: usize,
        /// What is wrong with the line.
        reason: String,
    },

    /// Two grids that must share dimensions do not.
    #[error("grid dimensions differ: {left_rows}x{left_cols} vs {right_rows}x{right_cols}")]
    DimensionMismatch {
        /// Height of the receiver.
        left_rows: usize,
        /// Width of the receiver.
        left_cols: usize,
        /// Height of the other grid.
        right_rows: usize,
        /// Width of the other grid.
        right_cols: usize,
    },
}
