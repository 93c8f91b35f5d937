//! Error types for grid construction and search.

use grid_util::point::Point;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimension must be positive, got {rows}")]
    InvalidDimension { rows: i32 },

    #[error("cell ({row}, {col}) is outside of a {rows}x{rows} grid")]
    OutOfBounds { row: i32, col: i32, rows: usize },

    #[error("invalid endpoints: start {start:?}, end {end:?}")]
    InvalidEndpoints { start: Point, end: Point },

    #[error("unknown cell symbol {symbol:?} at ({row}, {col})")]
    UnknownSymbol { row: i32, col: i32, symbol: char },

    /// The predecessor chain does not lead back to the start. Points at the last cell reached.
    #[error("predecessor chain is broken at {at:?}")]
    BrokenChain { at: Point },
}

pub type Result<T> = std::result::Result<T, GridError>;
