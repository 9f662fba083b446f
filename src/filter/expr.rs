//! Expression-based filtering
//!
//! A small expression language over column values. The dashboard needs
//! equality on string and integer columns, prefix matching for the homicide
//! code family, and conjunction; everything compiles to vectorized Arrow
//! kernels.

use std::collections::HashSet;

use arrow::array::{Array, BooleanArray, Int32Array, Int64Array, Scalar, StringArray};
use arrow::compute::and;
use arrow::compute::kernels::cmp::eq;
use arrow::record_batch::RecordBatch;

use crate::error::{Result, column_not_found, column_type_error, filter_err};
use crate::filter::core::{BatchFilter, filter_record_batch};

/// A filter expression over record batch columns
#[derive(Debug, Clone)]
pub enum Expr {
    /// Column equals a literal value
    Eq(String, LiteralValue),

    /// Column value starts with a prefix
    StartsWith(String, String),

    /// Logical AND of expressions
    And(Vec<Expr>),

    /// Always evaluates to true
    AlwaysTrue,
}

/// A literal value usable in filter expressions
#[derive(Debug, Clone)]
pub enum LiteralValue {
    /// Integer value
    Int(i64),

    /// String value
    String(String),
}

impl Expr {
    /// Returns the set of column names required by this expression
    #[must_use]
    pub fn required_columns(&self) -> HashSet<String> {
        let mut columns = HashSet::new();
        self.collect_required_columns(&mut columns);
        columns
    }

    fn collect_required_columns(&self, columns: &mut HashSet<String>) {
        match self {
            Self::Eq(col, _) | Self::StartsWith(col, _) => {
                columns.insert(col.clone());
            }
            Self::And(exprs) => {
                for expr in exprs {
                    expr.collect_required_columns(columns);
                }
            }
            Self::AlwaysTrue => {}
        }
    }
}

/// A filter that evaluates an expression against a record batch
#[derive(Debug, Clone)]
pub struct ExpressionFilter {
    expr: Expr,
}

impl ExpressionFilter {
    /// Create a new expression filter
    #[must_use]
    pub fn new(expr: Expr) -> Self {
        Self { expr }
    }

    /// Evaluate the expression into a boolean mask
    ///
    /// # Errors
    /// Returns an error if a referenced column is missing or mistyped
    pub fn evaluate(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        evaluate_expr(batch, &self.expr)
    }
}

impl BatchFilter for ExpressionFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let mask = self.evaluate(batch)?;
        filter_record_batch(batch, &mask)
    }

    fn required_columns(&self) -> HashSet<String> {
        self.expr.required_columns()
    }
}

/// Evaluate an expression against a record batch
///
/// # Errors
/// Returns an error if a referenced column is missing or mistyped
pub fn evaluate_expr(batch: &RecordBatch, expr: &Expr) -> Result<BooleanArray> {
    match expr {
        Expr::AlwaysTrue => Ok(BooleanArray::from(vec![true; batch.num_rows()])),

        Expr::And(exprs) => {
            if exprs.is_empty() {
                return Ok(BooleanArray::from(vec![true; batch.num_rows()]));
            }
            let mut result = evaluate_expr(batch, &exprs[0])?;
            for expr in &exprs[1..] {
                let mask = evaluate_expr(batch, expr)?;
                result = and(&result, &mask)?;
            }
            Ok(result)
        }

        Expr::Eq(col_name, literal_value) => evaluate_eq(batch, col_name, literal_value),

        Expr::StartsWith(col_name, prefix) => evaluate_starts_with(batch, col_name, prefix),
    }
}

fn evaluate_eq(
    batch: &RecordBatch,
    col_name: &str,
    literal_value: &LiteralValue,
) -> Result<BooleanArray> {
    let col_idx = match batch.schema().index_of(col_name) {
        Ok(idx) => idx,
        Err(_) => return column_not_found(col_name),
    };
    let column = batch.column(col_idx);

    match literal_value {
        LiteralValue::String(s) => {
            let Some(str_array) = column.as_any().downcast_ref::<StringArray>() else {
                return column_type_error(col_name, "string");
            };
            let literal = Scalar::new(StringArray::from(vec![s.clone()]));
            Ok(eq(str_array, &literal)?)
        }
        LiteralValue::Int(n) => {
            if let Some(int_array) = column.as_any().downcast_ref::<Int32Array>() {
                // A literal outside the i32 range can never match an Int32 column
                let Ok(n_i32) = i32::try_from(*n) else {
                    return Ok(BooleanArray::from(vec![false; int_array.len()]));
                };
                let literal = Scalar::new(Int32Array::from(vec![n_i32]));
                Ok(eq(int_array, &literal)?)
            } else if let Some(int_array) = column.as_any().downcast_ref::<Int64Array>() {
                let literal = Scalar::new(Int64Array::from(vec![*n]));
                Ok(eq(int_array, &literal)?)
            } else {
                column_type_error(col_name, "integer")
            }
        }
    }
}

fn evaluate_starts_with(batch: &RecordBatch, col_name: &str, prefix: &str) -> Result<BooleanArray> {
    let col_idx = match batch.schema().index_of(col_name) {
        Ok(idx) => idx,
        Err(_) => return column_not_found(col_name),
    };
    let column = batch.column(col_idx);

    let Some(str_array) = column.as_any().downcast_ref::<StringArray>() else {
        return column_type_error(col_name, "string");
    };

    let mask: Vec<bool> = (0..str_array.len())
        .map(|i| !str_array.is_null(i) && str_array.value(i).trim().starts_with(prefix))
        .collect();
    Ok(BooleanArray::from(mask))
}

/// Helper to create an equality filter for a column
#[must_use]
pub fn eq_filter(column: &str, value: LiteralValue) -> Expr {
    Expr::Eq(column.to_string(), value)
}

/// Helper to create a prefix filter for a column
#[must_use]
pub fn starts_with_filter(column: &str, prefix: &str) -> Expr {
    Expr::StartsWith(column.to_string(), prefix.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("SEXO", DataType::Int32, true),
            Field::new("CAUSA_DEFUNCION", DataType::Utf8, true),
            Field::new("NOM_DPTO", DataType::Utf8, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![Some(1), Some(2), None, Some(1)])),
                Arc::new(StringArray::from(vec![
                    Some("X954"),
                    Some("I219"),
                    Some("X950"),
                    None,
                ])),
                Arc::new(StringArray::from(vec![
                    Some("ANTIOQUIA"),
                    Some("ANTIOQUIA"),
                    Some("BOLIVAR"),
                    Some("BOLIVAR"),
                ])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn int_equality_skips_nulls() {
        let filter = ExpressionFilter::new(eq_filter("SEXO", LiteralValue::Int(1)));
        let filtered = filter.filter(&batch()).unwrap();
        assert_eq!(filtered.num_rows(), 2);
    }

    #[test]
    fn string_equality() {
        let filter = ExpressionFilter::new(eq_filter(
            "NOM_DPTO",
            LiteralValue::String("ANTIOQUIA".to_string()),
        ));
        let filtered = filter.filter(&batch()).unwrap();
        assert_eq!(filtered.num_rows(), 2);
    }

    #[test]
    fn starts_with_matches_code_family() {
        let filter = ExpressionFilter::new(starts_with_filter("CAUSA_DEFUNCION", "X95"));
        let filtered = filter.filter(&batch()).unwrap();
        assert_eq!(filtered.num_rows(), 2);
    }

    #[test]
    fn conjunction_applies_all_predicates() {
        let expr = Expr::And(vec![
            eq_filter("SEXO", LiteralValue::Int(1)),
            starts_with_filter("CAUSA_DEFUNCION", "X95"),
        ]);
        let filtered = ExpressionFilter::new(expr).filter(&batch()).unwrap();
        assert_eq!(filtered.num_rows(), 1);
    }

    #[test]
    fn always_true_keeps_everything() {
        let filtered = ExpressionFilter::new(Expr::AlwaysTrue)
            .filter(&batch())
            .unwrap();
        assert_eq!(filtered.num_rows(), 4);
    }

    #[test]
    fn missing_column_is_an_error() {
        let filter = ExpressionFilter::new(eq_filter("NOPE", LiteralValue::Int(1)));
        assert!(filter.filter(&batch()).is_err());
    }

    #[test]
    fn out_of_range_literal_matches_nothing() {
        let filter = ExpressionFilter::new(eq_filter("SEXO", LiteralValue::Int(i64::MAX)));
        let filtered = filter.filter(&batch()).unwrap();
        assert_eq!(filtered.num_rows(), 0);
    }
}
