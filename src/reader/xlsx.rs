//! Spreadsheet reading via calamine
//!
//! Reads the first worksheet of a workbook into an Arrow record batch. Every
//! column comes out as trimmed Utf8 with the raw headers preserved; typing
//! onto a canonical schema happens later in `schema::compat`, so this reader
//! also serves the cause-code table whose columns are not known in advance.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use calamine::{Data, DataType as _, Range, Reader, open_workbook_auto};

use crate::error::{DashboardError, Result};
use crate::utils::{log_operation_complete, log_operation_start};

/// Read the first worksheet of a workbook into a record batch
///
/// The first row is the header row; fully empty rows are dropped.
///
/// # Errors
/// Returns an error if the workbook cannot be opened or has no usable sheet
pub fn read_workbook(path: &Path) -> Result<RecordBatch> {
    let start = std::time::Instant::now();
    log_operation_start("Reading workbook", path);

    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| DashboardError::schema(format!("{} has no sheets", path.display())))?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let batch = range_to_batch(&range)?;
    log_operation_complete("read", path, batch.num_rows(), Some(start.elapsed()));
    Ok(batch)
}

/// Convert a cell range into a record batch of trimmed Utf8 columns
///
/// # Errors
/// Returns an error if the range has no header row
pub fn range_to_batch(range: &Range<Data>) -> Result<RecordBatch> {
    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| DashboardError::schema("worksheet is empty"))?;

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| cell_to_string(cell).unwrap_or_else(|| format!("COL_{idx}")))
        .collect();

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for row in rows {
        if row.iter().all(calamine::DataType::is_empty) {
            continue;
        }
        for (idx, values) in columns.iter_mut().enumerate() {
            values.push(row.get(idx).and_then(cell_to_string));
        }
    }

    let fields: Vec<Field> = headers
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    let arrays: Vec<ArrayRef> = columns
        .into_iter()
        .map(|values| Arc::new(StringArray::from(values)) as ArrayRef)
        .collect();

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

/// Render a cell as a trimmed string, `None` for empty or error cells
///
/// Whole-valued floats print without the decimal point so numeric codes read
/// back as `"5"`, not `"5.0"`.
#[must_use]
pub fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;

    #[test]
    fn cell_rendering() {
        assert_eq!(cell_to_string(&Data::Empty), None);
        assert_eq!(cell_to_string(&Data::String("  X95 ".to_string())).as_deref(), Some("X95"));
        assert_eq!(cell_to_string(&Data::Int(5)).as_deref(), Some("5"));
        assert_eq!(cell_to_string(&Data::Float(5.0)).as_deref(), Some("5"));
        assert_eq!(cell_to_string(&Data::Float(2.5)).as_deref(), Some("2.5"));
        assert_eq!(cell_to_string(&Data::String("   ".to_string())), None);
    }

    #[test]
    fn range_becomes_utf8_batch_with_headers() {
        let mut range: Range<Data> = Range::new((0, 0), (3, 1));
        range.set_value((0, 0), Data::String("COD_DPTO".to_string()));
        range.set_value((0, 1), Data::String("DEPARTAMENTO".to_string()));
        range.set_value((1, 0), Data::Int(5));
        range.set_value((1, 1), Data::String("ANTIOQUIA".to_string()));
        // Row 2 left fully empty: must be dropped
        range.set_value((3, 0), Data::Float(8.0));
        range.set_value((3, 1), Data::String("ATLANTICO".to_string()));

        let batch = range_to_batch(&range).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.schema().field(0).name(), "COD_DPTO");

        let codes = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(codes.value(0), "5");
        assert_eq!(codes.value(1), "8");
    }

    #[test]
    fn blank_headers_get_positional_names() {
        let mut range: Range<Data> = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), Data::String("CODIGO".to_string()));
        range.set_value((1, 0), Data::String("A00".to_string()));
        range.set_value((1, 1), Data::String("Colera".to_string()));

        let batch = range_to_batch(&range).unwrap();
        assert_eq!(batch.schema().field(1).name(), "COL_1");
    }
}
