//! Table reading with format dispatch
//!
//! A source path may be a single workbook, a single parquet file, or a
//! directory of files; the reader picks the backend by extension.

pub mod parquet;
pub mod xlsx;

use std::path::Path;

use arrow::record_batch::RecordBatch;

use crate::error::{DashboardError, Result};
use crate::utils::progress::{create_spinner, finish_progress_bar};

/// Read a table from a path into record batches
///
/// # Errors
/// Returns an error if the path does not exist or no backend handles it
pub fn read_table(path: &Path) -> Result<Vec<RecordBatch>> {
    if !path.exists() {
        return Err(DashboardError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Data source not found: {}", path.display()),
        )));
    }

    let spinner = create_spinner(Some(&format!("Loading {}", path.display())));
    let result = read_table_inner(path);
    match &result {
        Ok(batches) => {
            let rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
            finish_progress_bar(&spinner, Some(&format!("{rows} rows from {}", path.display())));
        }
        Err(_) => finish_progress_bar(&spinner, Some("failed")),
    }
    result
}

fn read_table_inner(path: &Path) -> Result<Vec<RecordBatch>> {
    if path.is_dir() {
        let batches = parquet::load_parquet_files_parallel(path, None)?;
        if batches.is_empty() {
            return Err(DashboardError::schema(format!(
                "No data files found in {}",
                path.display()
            )));
        }
        return Ok(batches);
    }

    match path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("xlsx" | "xlsm" | "xls") => Ok(vec![xlsx::read_workbook(path)?]),
        Some("parquet") => parquet::read_parquet(path, None),
        _ => Err(DashboardError::schema(format!(
            "Unsupported data file: {}",
            path.display()
        ))),
    }
}
