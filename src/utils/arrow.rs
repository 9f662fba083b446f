//! Typed column access for Arrow record batches
//!
//! High-level helpers for pulling typed columns and single values out of
//! record batches with consistent error reporting.

use arrow::array::{Array, ArrayRef, Int32Array, StringArray};
use arrow::record_batch::RecordBatch;

use crate::error::{Result, column_not_found, column_type_error};

/// Get a column from a record batch by name
///
/// # Errors
/// Returns an error if the column does not exist
pub fn get_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a ArrayRef> {
    match batch.schema().index_of(column_name) {
        Ok(idx) => Ok(batch.column(idx)),
        Err(_) => column_not_found(column_name),
    }
}

/// Get a column as a `StringArray`
///
/// # Errors
/// Returns an error if the column is missing or not a string array
pub fn string_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a StringArray> {
    let array = get_column(batch, column_name)?;
    match array.as_any().downcast_ref::<StringArray>() {
        Some(string_array) => Ok(string_array),
        None => column_type_error(column_name, "string"),
    }
}

/// Get a column as an `Int32Array`
///
/// # Errors
/// Returns an error if the column is missing or not an Int32 array
pub fn int_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a Int32Array> {
    let array = get_column(batch, column_name)?;
    match array.as_any().downcast_ref::<Int32Array>() {
        Some(int_array) => Ok(int_array),
        None => column_type_error(column_name, "Int32"),
    }
}

/// Extract a string value from a record batch row
///
/// Returns `None` for nulls, missing rows, and empty strings.
#[must_use]
pub fn extract_string(array: &StringArray, row: usize) -> Option<String> {
    if row < array.len() && !array.is_null(row) {
        let value = array.value(row).trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }
    None
}

/// Extract an integer value from a record batch row
#[must_use]
pub fn extract_int(array: &Int32Array, row: usize) -> Option<i32> {
    if row < array.len() && !array.is_null(row) {
        Some(array.value(row))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("CODE", DataType::Int32, true),
            Field::new("NAME", DataType::Utf8, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![Some(5), None])),
                Arc::new(StringArray::from(vec![Some("ANTIOQUIA"), Some("  ")])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn typed_access_and_nulls() {
        let batch = batch();
        let codes = int_column(&batch, "CODE").unwrap();
        assert_eq!(extract_int(codes, 0), Some(5));
        assert_eq!(extract_int(codes, 1), None);

        let names = string_column(&batch, "NAME").unwrap();
        assert_eq!(extract_string(names, 0).as_deref(), Some("ANTIOQUIA"));
        // Whitespace-only cells behave like nulls
        assert_eq!(extract_string(names, 1), None);
    }

    #[test]
    fn missing_and_mistyped_columns_error() {
        let batch = batch();
        assert!(get_column(&batch, "NOPE").is_err());
        assert!(string_column(&batch, "CODE").is_err());
        assert!(int_column(&batch, "NAME").is_err());
    }
}
