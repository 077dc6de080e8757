//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur while assembling an XLSX package
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The package would contain dangling references or duplicates
    #[error("Package integrity violation: {0}")]
    StructuralIntegrity(String),

    /// A cell value that has no OOXML representation
    #[error("Unsupported cell value: {0}")]
    UnsupportedCellValue(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] sheetsmith_core::Error),
}
