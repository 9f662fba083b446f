//! Schema projection and type adaptation
//!
//! Projects a loaded batch onto a canonical schema: columns are matched by
//! name, cast when the types differ (string-to-int parsing included, invalid
//! values become nulls), and missing columns are reported as issues. In lax
//! mode a missing column becomes an all-null column so a partially damaged
//! extract still loads; strict mode fails the load instead.

use std::sync::Arc;

use arrow::array::new_null_array;
use arrow::compute::cast;
use arrow::record_batch::RecordBatch;
use arrow_schema::SchemaRef;

use crate::error::{DashboardError, Result};
use crate::utils::log_warning;

/// A single schema incompatibility found while projecting a batch
#[derive(Debug, Clone)]
pub struct SchemaIssue {
    /// Canonical name of the affected column
    pub column: String,
    /// Human-readable description of the problem
    pub message: String,
}

/// Outcome of projecting a batch onto a canonical schema
#[derive(Debug, Clone, Default)]
pub struct SchemaCompatibilityReport {
    /// Issues found during projection; empty when fully compatible
    pub issues: Vec<SchemaIssue>,
}

impl SchemaCompatibilityReport {
    /// Whether the batch matched the canonical schema without adjustments
    #[must_use]
    pub fn compatible(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Project a record batch onto a canonical schema
///
/// Returns the projected batch (columns in canonical order) together with a
/// compatibility report.
///
/// # Errors
/// Returns an error in strict mode when a column is missing or cannot be
/// cast, and always when batch reconstruction fails
pub fn project_to_schema(
    batch: &RecordBatch,
    target: &SchemaRef,
    strict: bool,
) -> Result<(RecordBatch, SchemaCompatibilityReport)> {
    let mut report = SchemaCompatibilityReport::default();
    let mut columns = Vec::with_capacity(target.fields().len());

    for field in target.fields() {
        let name = field.name();
        match batch.schema().index_of(name) {
            Ok(idx) => {
                let column = batch.column(idx);
                if column.data_type() == field.data_type() {
                    columns.push(Arc::clone(column));
                } else {
                    match cast(column.as_ref(), field.data_type()) {
                        Ok(adapted) => {
                            log::debug!(
                                "Adapted column {name} from {:?} to {:?}",
                                column.data_type(),
                                field.data_type()
                            );
                            columns.push(adapted);
                        }
                        Err(e) => {
                            let message = format!(
                                "Cannot adapt {:?} to {:?}: {e}",
                                column.data_type(),
                                field.data_type()
                            );
                            if strict {
                                return Err(DashboardError::schema(format!(
                                    "Column {name}: {message}"
                                )));
                            }
                            report.issues.push(SchemaIssue {
                                column: name.clone(),
                                message,
                            });
                            columns.push(new_null_array(field.data_type(), batch.num_rows()));
                        }
                    }
                }
            }
            Err(_) => {
                if strict {
                    return Err(DashboardError::schema(format!(
                        "Required column {name} is missing"
                    )));
                }
                log_warning(&format!("Column {name} missing, filling with nulls"), None);
                report.issues.push(SchemaIssue {
                    column: name.clone(),
                    message: "missing from source".to_string(),
                });
                columns.push(new_null_array(field.data_type(), batch.num_rows()));
            }
        }
    }

    let projected = RecordBatch::try_new(Arc::clone(target), columns)?;
    Ok((projected, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Int32Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};

    fn target() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("COD_DPTO", DataType::Int32, true),
            Field::new("NOM_DPTO", DataType::Utf8, true),
        ]))
    }

    #[test]
    fn parses_string_codes_into_ints() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("COD_DPTO", DataType::Utf8, true),
            Field::new("NOM_DPTO", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec![Some("05"), Some("x")])),
                Arc::new(StringArray::from(vec!["ANTIOQUIA", "ATLANTICO"])),
            ],
        )
        .unwrap();

        let (projected, report) = project_to_schema(&batch, &target(), false).unwrap();
        assert!(report.compatible());
        let codes = projected
            .column(0)
            .as_any()
            .downcast_ref::<Int32Array>()
            .unwrap();
        assert_eq!(codes.value(0), 5);
        // Unparseable values become nulls rather than failing the load
        assert!(codes.is_null(1));
    }

    #[test]
    fn missing_column_is_reported_and_null_filled() {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "COD_DPTO",
            DataType::Int32,
            true,
        )]));
        let batch = RecordBatch::try_new(schema, vec![Arc::new(Int32Array::from(vec![5]))]).unwrap();

        let (projected, report) = project_to_schema(&batch, &target(), false).unwrap();
        assert!(!report.compatible());
        assert_eq!(report.issues[0].column, "NOM_DPTO");
        assert_eq!(projected.column(1).null_count(), 1);
    }

    #[test]
    fn strict_mode_fails_on_missing_column() {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "COD_DPTO",
            DataType::Int32,
            true,
        )]));
        let batch = RecordBatch::try_new(schema, vec![Arc::new(Int32Array::from(vec![5]))]).unwrap();
        assert!(project_to_schema(&batch, &target(), true).is_err());
    }
}
