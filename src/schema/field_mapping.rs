//! Column rename maps per source
//!
//! The DANE extracts name the same fields differently across files (and the
//! mortality extract ships a mangled `AO` header for `AÑO`). These maps bring
//! raw headers onto the canonical column names.

use std::sync::Arc;

use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::error::Result;

/// Raw-to-canonical renames for the mortality extract
pub const MORTALITY_RENAMES: &[(&str, &str)] = &[
    ("COD_DEPARTAMENTO", "COD_DPTO"),
    ("COD_MUNICIPIO", "COD_MUNIC"),
    ("AÑO", "ANO"),
    ("AO", "ANO"),
    ("COD_MUERTE", "CAUSA_DEFUNCION"),
];

/// Raw-to-canonical renames for the DIVIPOLA table
pub const DIVIPOLA_RENAMES: &[(&str, &str)] = &[
    ("COD_DEPARTAMENTO", "COD_DPTO"),
    ("DEPARTAMENTO", "NOM_DPTO"),
    ("COD_MUNICIPIO", "COD_MUNIC"),
    ("MUNICIPIO", "NOM_MUNIC"),
];

/// Apply a rename map to the columns of a record batch
///
/// Columns not present in the map keep their names; the arrays themselves are
/// shared, not copied.
///
/// # Errors
/// Returns an error if the renamed schema cannot be rebuilt
pub fn rename_columns(batch: &RecordBatch, renames: &[(&str, &str)]) -> Result<RecordBatch> {
    let fields: Vec<Field> = batch
        .schema()
        .fields()
        .iter()
        .map(|field| {
            let name = renames
                .iter()
                .find(|(raw, _)| raw == field.name())
                .map_or_else(|| field.name().clone(), |(_, canonical)| (*canonical).to_string());
            Field::new(name, field.data_type().clone(), field.is_nullable())
        })
        .collect();

    let schema = Arc::new(Schema::new(fields));
    Ok(RecordBatch::try_new(schema, batch.columns().to_vec())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int32Array;
    use arrow::datatypes::DataType;

    #[test]
    fn renames_mapped_columns_and_keeps_others() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("COD_DEPARTAMENTO", DataType::Int32, true),
            Field::new("MES", DataType::Int32, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![5])),
                Arc::new(Int32Array::from(vec![3])),
            ],
        )
        .unwrap();

        let renamed = rename_columns(&batch, MORTALITY_RENAMES).unwrap();
        assert_eq!(renamed.schema().field(0).name(), "COD_DPTO");
        assert_eq!(renamed.schema().field(1).name(), "MES");
        assert_eq!(renamed.num_rows(), 1);
    }
}
