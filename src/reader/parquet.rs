//! Parquet reading for cached extract snapshots
//!
//! The original extracts are spreadsheets, but re-exported snapshots of the
//! same tables are accepted as Parquet and load through the arrow reader with
//! optional schema projection; directories of files load in parallel.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use parquet::arrow::ProjectionMask;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use rayon::prelude::*;

use crate::error::{DashboardError, Result};
use crate::utils::{log_operation_complete, log_operation_start, log_warning};

/// Read a parquet file into Arrow record batches
///
/// # Arguments
/// * `path` - Path to the Parquet file
/// * `schema` - Optional Arrow schema for projecting specific columns
///
/// # Errors
/// Returns an error if the file cannot be opened or is not valid Parquet
pub fn read_parquet(path: &Path, schema: Option<&Schema>) -> Result<Vec<RecordBatch>> {
    let start = std::time::Instant::now();
    log_operation_start("Reading parquet file", path);

    let file = File::open(path)
        .with_context(|| format!("Failed to open parquet file {}", path.display()))?;
    let reader_builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("Failed to read parquet file {}", path.display()))?;

    let reader = if let Some(schema) = schema {
        let file_schema = reader_builder.schema();
        let projection: Vec<usize> = schema
            .fields()
            .iter()
            .filter_map(|f| match file_schema.index_of(f.name()) {
                Ok(idx) => Some(idx),
                Err(_) => {
                    log_warning(
                        &format!("Field {} not found in parquet file, skipping", f.name()),
                        None,
                    );
                    None
                }
            })
            .collect_vec();

        if projection.is_empty() {
            log_warning(
                "No matching fields found in schema projection, reading all columns",
                None,
            );
            reader_builder
                .build()
                .context("Failed to build parquet reader")?
        } else {
            let mask = ProjectionMask::leaves(reader_builder.parquet_schema(), projection);
            reader_builder
                .with_projection(mask)
                .build()
                .context("Failed to build parquet reader with projection")?
        }
    } else {
        reader_builder
            .build()
            .context("Failed to build parquet reader")?
    };

    let batches: Vec<RecordBatch> = reader
        .map(|batch_result| {
            batch_result
                .map_err(|e| DashboardError::schema(format!("Failed to read record batch: {e}")))
        })
        .collect::<Result<_>>()?;

    log_operation_complete("read", path, batches.len(), Some(start.elapsed()));
    Ok(batches)
}

/// Find all Parquet files in a directory, newest first
///
/// # Errors
/// Returns an error if the directory cannot be read
pub fn find_parquet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    log_operation_start("Searching for parquet files in", dir);

    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;

    let extensions: HashSet<&str> = HashSet::from(["parquet"]);
    let parquet_files = entries
        .filter_map(|entry_result| {
            let path = entry_result.ok()?.path();
            let matches = path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| extensions.contains(ext.to_string_lossy().as_ref()));
            matches.then_some(path)
        })
        .sorted_by(|a, b| {
            std::fs::metadata(b)
                .and_then(|m| m.modified())
                .ok()
                .cmp(&std::fs::metadata(a).and_then(|m| m.modified()).ok())
        })
        .collect_vec();

    if parquet_files.is_empty() {
        log_warning("No Parquet files found in directory", Some(dir));
    } else {
        log_operation_complete("found", dir, parquet_files.len(), None);
    }

    Ok(parquet_files)
}

/// Load all parquet files from a directory in parallel
///
/// # Errors
/// Returns an error if directory reading fails or any file cannot be read
pub fn load_parquet_files_parallel(dir: &Path, schema: Option<&Schema>) -> Result<Vec<RecordBatch>> {
    let parquet_files = find_parquet_files(dir)?;
    if parquet_files.is_empty() {
        return Ok(Vec::new());
    }

    let all_batches: Vec<Result<Vec<RecordBatch>>> = parquet_files
        .par_iter()
        .map(|path| read_parquet(path, schema))
        .collect();

    let mut combined_batches = Vec::new();
    for result in all_batches {
        combined_batches.extend(result?);
    }

    log::info!(
        "Successfully loaded {} batches from {} Parquet files",
        combined_batches.len(),
        parquet_files.len()
    );

    Ok(combined_batches)
}
