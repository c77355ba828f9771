//! Structured error types for xlreport.
//!
//! Layout construction and drawing fail fast with a configuration error;
//! packaging failures wrap the underlying `zip`/`io`/`serde_json` errors.

/// All errors that can occur while building, drawing or saving a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A layout, style, table or report definition was configured incorrectly.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A layout that must own the whole sheet was drawn away from `(0, 0)`.
    #[error("Invalid origin ({column}, {row}): this layout must be drawn at (0, 0)")]
    InvalidOrigin { column: u32, row: u32 },

    /// Geometry or table access outside the addressable range.
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// A cell written beyond the XLSX grid.
    #[error("Cell at row {row}, column {column} is outside the XLSX grid")]
    GridLimit { row: u32, column: u32 },

    /// Invalid cell reference.
    #[error("Invalid cell reference: {0}")]
    CellRef(String),

    /// Invalid `#RRGGBB` colour.
    #[error("Invalid color: {0}")]
    Color(String),

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Report definition (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
