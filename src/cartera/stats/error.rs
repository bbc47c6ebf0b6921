use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads a policy listing, aggregates it, or emits a report.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as unreadable inputs or a closed stdout.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the JSON report cannot be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// The input exists but is not a readable xlsx workbook.
    #[error("Excel read error: {0}")]
    ExcelRead(calamine::XlsxError),

    /// Raised when a workbook does not contain anything to analyse.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl From<calamine::XlsxError> for ToolError {
    fn from(error: calamine::XlsxError) -> Self {
        match error {
            calamine::XlsxError::Io(inner) => ToolError::Io(inner),
            other => ToolError::ExcelRead(other),
        }
    }
}
