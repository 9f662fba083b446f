//! Column guessing for the cause-code table
//!
//! The published code table has shifted headers between releases, so the
//! catalog cannot rely on column names. A column is *code-shaped* when its
//! first non-empty value is short and mixes letters and digits (the ICD-10
//! silhouette); the description column is recognized by header keywords.
//! Every code-shaped column contributes pairs, later columns overwriting
//! earlier ones, and the overlap with the codes actually observed in the
//! mortality extract is logged as a confidence signal.

use std::collections::HashSet;

use arrow::array::{Array, StringArray};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;

/// Header keywords that identify a description column
const DESCRIPTION_KEYWORDS: &[&str] = &["DESCRIP", "NOMBRE", "CAUSA"];

/// Maximum length for a value to count as code-shaped
const MAX_CODE_LEN: usize = 10;

/// Whether a value looks like an ICD-10 code
#[must_use]
pub fn is_code_shaped(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && value.len() <= MAX_CODE_LEN
        && value.chars().any(|c| c.is_alphabetic())
        && value.chars().any(|c| c.is_ascii_digit())
}

/// Index of the first column whose header names a description
#[must_use]
pub fn description_column(batch: &RecordBatch) -> Option<usize> {
    batch.schema().fields().iter().position(|field| {
        let header = field.name().to_uppercase();
        DESCRIPTION_KEYWORDS.iter().any(|kw| header.contains(kw))
    })
}

/// Indices of string columns whose first non-empty value is code-shaped
#[must_use]
pub fn code_shaped_columns(batch: &RecordBatch) -> Vec<usize> {
    (0..batch.num_columns())
        .filter(|&idx| {
            let Some(array) = batch.column(idx).as_any().downcast_ref::<StringArray>() else {
                return false;
            };
            first_non_empty(array).is_some_and(|sample| is_code_shaped(&sample))
        })
        .collect()
}

fn first_non_empty(array: &StringArray) -> Option<String> {
    (0..array.len()).find_map(|i| {
        if array.is_null(i) {
            return None;
        }
        let value = array.value(i).trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Build a code-to-description mapping from one table batch
///
/// Returns `None` when no code-shaped column or no description column exists,
/// signaling the caller to fall back to constants.
#[must_use]
pub fn build_mapping(
    batch: &RecordBatch,
    observed_codes: &HashSet<String>,
) -> Option<FxHashMap<String, String>> {
    let desc_idx = description_column(batch)?;
    let code_indices = code_shaped_columns(batch);
    if code_indices.is_empty() {
        return None;
    }

    let descriptions = batch
        .column(desc_idx)
        .as_any()
        .downcast_ref::<StringArray>()?;

    let mut mapping = FxHashMap::default();
    for idx in code_indices {
        let codes = batch.column(idx).as_any().downcast_ref::<StringArray>()?;
        let column_name = batch.schema().field(idx).name().clone();

        let mut matches = 0usize;
        for row in 0..codes.len() {
            if codes.is_null(row) || descriptions.is_null(row) {
                continue;
            }
            let code = codes.value(row).trim();
            let description = descriptions.value(row).trim();
            if code.is_empty() || description.is_empty() {
                continue;
            }
            if observed_codes.contains(code) {
                matches += 1;
            }
            mapping.insert(code.to_string(), description.to_string());
        }

        log::info!(
            "Cause column candidate {column_name}: {matches} of {} observed codes matched",
            observed_codes.len()
        );
    }

    (!mapping.is_empty()).then_some(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    #[test]
    fn code_shape_detection() {
        assert!(is_code_shaped("X954"));
        assert!(is_code_shaped("I219"));
        assert!(!is_code_shaped("Infarto agudo del miocardio"));
        assert!(!is_code_shaped("1234"));
        assert!(!is_code_shaped("CAPITULO"));
        assert!(!is_code_shaped(""));
    }

    #[test]
    fn finds_description_column_by_keyword() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("COL_0", DataType::Utf8, true),
            Field::new("Nombre de la causa", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["A00"])),
                Arc::new(StringArray::from(vec!["Cólera"])),
            ],
        )
        .unwrap();
        assert_eq!(description_column(&batch), Some(1));
    }

    #[test]
    fn later_code_columns_overwrite_earlier_ones() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("CODIGO_3C", DataType::Utf8, true),
            Field::new("CODIGO_4C", DataType::Utf8, true),
            Field::new("DESCRIPCION", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec![Some("I21"), Some("I21")])),
                Arc::new(StringArray::from(vec![Some("I219"), Some("I210")])),
                Arc::new(StringArray::from(vec![
                    Some("Infarto agudo del miocardio"),
                    Some("Infarto de la pared anterior"),
                ])),
            ],
        )
        .unwrap();

        let observed = HashSet::from(["I219".to_string()]);
        let mapping = build_mapping(&batch, &observed).unwrap();
        // The 3-character column maps I21 to the later row's description
        assert_eq!(mapping["I21"], "Infarto de la pared anterior");
        assert_eq!(mapping["I219"], "Infarto agudo del miocardio");
    }

    #[test]
    fn missing_description_column_yields_none() {
        let schema = Arc::new(Schema::new(vec![Field::new("COL_0", DataType::Utf8, true)]));
        let batch =
            RecordBatch::try_new(schema, vec![Arc::new(StringArray::from(vec!["A00"]))]).unwrap();
        assert!(build_mapping(&batch, &HashSet::new()).is_none());
    }
}
