//! The joined in-memory mortality table
//!
//! Mortality batches concatenate into one record batch and gain two columns,
//! `NOM_DPTO` and `NOM_MUNIC`, resolved through the DIVIPOLA lookup. Code
//! pairs without a DIVIPOLA entry are labeled `Desconocido`, so every row
//! survives the join.

pub mod selection;

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::compute::concat_batches;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::error::{DashboardError, Result};
use crate::filter::{BatchFilter, Expr, ExpressionFilter};
use crate::model::DivisionLookup;
use crate::utils::arrow::{extract_int, extract_string, int_column, string_column};

pub use selection::Selection;

/// The assembled dataset served by the dashboard
#[derive(Debug, Clone)]
pub struct MortalityData {
    batch: RecordBatch,
    divisions: DivisionLookup,
}

impl MortalityData {
    /// Join mortality batches with the division lookup
    ///
    /// # Errors
    /// Returns an error if no batches were loaded or the join columns are
    /// missing
    pub fn assemble(batches: &[RecordBatch], divisions: DivisionLookup) -> Result<Self> {
        let Some(first) = batches.first() else {
            return Err(DashboardError::schema("Mortality extract produced no rows"));
        };
        let combined = concat_batches(&first.schema(), batches)?;

        let dpto_codes = int_column(&combined, "COD_DPTO")?;
        let munic_codes = int_column(&combined, "COD_MUNIC")?;

        let mut department_names = Vec::with_capacity(combined.num_rows());
        let mut municipality_names = Vec::with_capacity(combined.num_rows());
        for row in 0..combined.num_rows() {
            let dpto = extract_int(dpto_codes, row);
            let munic = extract_int(munic_codes, row);
            department_names.push(divisions.department_label(dpto));
            municipality_names.push(divisions.municipality_label(dpto, munic));
        }

        let mut fields: Vec<Field> = combined
            .schema()
            .fields()
            .iter()
            .map(|f| f.as_ref().clone())
            .collect();
        fields.push(Field::new("NOM_DPTO", DataType::Utf8, false));
        fields.push(Field::new("NOM_MUNIC", DataType::Utf8, false));

        let mut columns: Vec<ArrayRef> = combined.columns().to_vec();
        columns.push(Arc::new(StringArray::from(department_names)));
        columns.push(Arc::new(StringArray::from(municipality_names)));

        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
        log::info!(
            "Mortality dataset assembled: {} rows, {} municipalities known",
            batch.num_rows(),
            divisions.len()
        );

        Ok(Self { batch, divisions })
    }

    /// Rows matching the interactive selection
    ///
    /// # Errors
    /// Returns an error if filter evaluation fails
    pub fn filtered(&self, selection: &Selection) -> Result<RecordBatch> {
        self.filter_with(selection.to_expr())
    }

    /// Rows matching an arbitrary filter expression
    ///
    /// # Errors
    /// Returns an error if filter evaluation fails
    pub fn filter_with(&self, expr: Expr) -> Result<RecordBatch> {
        ExpressionFilter::new(expr).filter(&self.batch)
    }

    /// The full joined batch
    #[must_use]
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// The division lookup used for name resolution
    #[must_use]
    pub fn divisions(&self) -> &DivisionLookup {
        &self.divisions
    }

    /// Total number of death records
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Sorted unique department names present in the data
    ///
    /// # Errors
    /// Returns an error if the name column is missing
    pub fn departments(&self) -> Result<Vec<String>> {
        let names = string_column(&self.batch, "NOM_DPTO")?;
        Ok((0..names.len())
            .filter_map(|row| extract_string(names, row))
            .unique()
            .sorted()
            .collect_vec())
    }

    /// Sorted unique age-group codes present in the data
    ///
    /// # Errors
    /// Returns an error if the age-group column is missing
    pub fn age_groups(&self) -> Result<Vec<i32>> {
        let groups = int_column(&self.batch, "GRUPO_EDAD1")?;
        Ok((0..groups.len())
            .filter_map(|row| extract_int(groups, row))
            .unique()
            .sorted()
            .collect_vec())
    }

    /// Trimmed cause codes observed in the data
    ///
    /// # Errors
    /// Returns an error if the cause column is missing
    pub fn observed_causes(&self) -> Result<HashSet<String>> {
        let causes = string_column(&self.batch, "CAUSA_DEFUNCION")?;
        Ok((0..causes.len())
            .filter_map(|row| extract_string(causes, row))
            .collect())
    }
}
