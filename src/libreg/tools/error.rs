use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tools read text, talk to the publishing site, or convert workbooks.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when an input line is not valid UTF-8.
    #[error("line {line} is not valid UTF-8: {source}")]
    Encoding {
        line: usize,
        #[source]
        source: FromUtf8Error,
    },

    /// Transport level failures bubbled up from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Raised when the server answers with a non-success status.
    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Raised when a link or page address cannot be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Raised when the page does not link to any spreadsheet.
    #[error("no {extension} link found on {page}")]
    NoSpreadsheetLink { page: String, extension: String },

    /// Raised when a download URL has no usable final path segment.
    #[error("cannot derive a file name from {0}")]
    MissingFileName(String),

    /// Raised when the HTML link selector is rejected.
    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook has no usable sheet.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Errors bubbled up from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
