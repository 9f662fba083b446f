//! Error handling for the mortality dashboard.

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for dashboard operations
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reading a spreadsheet workbook
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error in Arrow compute or batch construction
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error with table schemas or column mapping
    #[error("Schema error: {0}")]
    Schema(String),

    /// Error evaluating a filter expression
    #[error("Filter error: {0}")]
    Filter(String),

    /// Error in dashboard configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Wrapped error with context from deeper layers
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DashboardError {
    /// Create a schema error from any displayable message
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a filter error from any displayable message
    pub fn filter(msg: impl Into<String>) -> Self {
        Self::Filter(msg.into())
    }
}

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Create a filter error result
pub fn filter_err<T>(message: impl AsRef<str>) -> Result<T> {
    Err(DashboardError::filter(message.as_ref()))
}

/// Create a column-not-found error result
pub fn column_not_found<T>(column_name: &str) -> Result<T> {
    filter_err(format!("Column '{column_name}' not found"))
}

/// Create a column type mismatch error result
pub fn column_type_error<T>(column_name: &str, expected_type: &str) -> Result<T> {
    filter_err(format!(
        "Column '{column_name}' is not a {expected_type} array"
    ))
}
