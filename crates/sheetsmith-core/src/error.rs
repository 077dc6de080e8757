//! Error types for sheetsmith-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or validating a workbook model
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or out-of-bounds cell address
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// The workbook has no worksheets
    #[error("Workbook must contain at least one worksheet")]
    NoWorksheets,

    /// A value that cannot be stored in a cell
    #[error("Unsupported cell value: {0}")]
    UnsupportedCellValue(String),

    /// Column width that is negative or not finite
    #[error("Invalid column width: {0}")]
    InvalidColumnWidth(f64),

    /// Merged cell conflict
    #[error("Range {0} overlaps an existing merged region")]
    MergedCellConflict(String),
}
