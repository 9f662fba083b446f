//! Group-by/count aggregation over record batch columns
//!
//! Every dashboard payload reduces to one of these single-pass tallies. Rows
//! with null keys are skipped, and top/bottom-N selection is deterministic:
//! count first, key ascending on ties.

use itertools::Itertools;
use rustc_hash::FxHashMap;

use arrow::array::Array;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::arrow::{extract_int, extract_string, int_column, string_column};

/// Count rows per value of an Int32 column
///
/// # Errors
/// Returns an error if the column is missing or mistyped
pub fn count_by_int(batch: &RecordBatch, column: &str) -> Result<FxHashMap<i32, u64>> {
    let array = int_column(batch, column)?;
    let mut counts = FxHashMap::default();
    for row in 0..array.len() {
        if let Some(value) = extract_int(array, row) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

/// Count rows per trimmed value of a Utf8 column
///
/// # Errors
/// Returns an error if the column is missing or mistyped
pub fn count_by_string(batch: &RecordBatch, column: &str) -> Result<FxHashMap<String, u64>> {
    let array = string_column(batch, column)?;
    let mut counts = FxHashMap::default();
    for row in 0..array.len() {
        if let Some(value) = extract_string(array, row) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

/// Count rows per pair of Int32 column values
///
/// Rows where either key is null are skipped.
///
/// # Errors
/// Returns an error if either column is missing or mistyped
pub fn count_by_int_pair(
    batch: &RecordBatch,
    first: &str,
    second: &str,
) -> Result<FxHashMap<(i32, i32), u64>> {
    let first_array = int_column(batch, first)?;
    let second_array = int_column(batch, second)?;
    let mut counts = FxHashMap::default();
    for row in 0..batch.num_rows() {
        if let (Some(a), Some(b)) = (extract_int(first_array, row), extract_int(second_array, row))
        {
            *counts.entry((a, b)).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

/// Number of distinct non-null values in an Int32 column
///
/// # Errors
/// Returns an error if the column is missing or mistyped
pub fn distinct_int(batch: &RecordBatch, column: &str) -> Result<u64> {
    Ok(count_by_int(batch, column)?.len() as u64)
}

/// Number of rows where an Int32 column equals a value
///
/// # Errors
/// Returns an error if the column is missing or mistyped
pub fn count_where_int_eq(batch: &RecordBatch, column: &str, value: i32) -> Result<u64> {
    let array = int_column(batch, column)?;
    let count = (0..array.len())
        .filter(|&row| extract_int(array, row) == Some(value))
        .count();
    Ok(count as u64)
}

/// Largest-N entries: count descending, key ascending on ties
#[must_use]
pub fn top_n<K: Ord>(counts: FxHashMap<K, u64>, n: usize) -> Vec<(K, u64)> {
    counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .take(n)
        .collect_vec()
}

/// Smallest-N entries: count ascending, key ascending on ties
#[must_use]
pub fn bottom_n<K: Ord>(counts: FxHashMap<K, u64>, n: usize) -> Vec<(K, u64)> {
    counts
        .into_iter()
        .sorted_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
        .take(n)
        .collect_vec()
}

/// All entries ordered by key ascending
#[must_use]
pub fn sorted_by_key<K: Ord>(counts: FxHashMap<K, u64>) -> Vec<(K, u64)> {
    counts
        .into_iter()
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .collect_vec()
}
