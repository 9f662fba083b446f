//! DIVIPOLA division reference model
//!
//! The DIVIPOLA table maps department and municipality codes to their
//! official names. Batches deserialize into [`DivisionRow`] structs and fold
//! into a [`DivisionLookup`] used to annotate mortality rows and resolve
//! aggregate keys back to names.

use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Name used when a code pair has no DIVIPOLA entry
pub const UNKNOWN_DIVISION: &str = "Desconocido";

/// One row of the canonical DIVIPOLA table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisionRow {
    /// Department code
    #[serde(rename = "COD_DPTO")]
    pub cod_dpto: Option<i32>,
    /// Department name
    #[serde(rename = "NOM_DPTO")]
    pub nom_dpto: Option<String>,
    /// Municipality code within the department
    #[serde(rename = "COD_MUNIC")]
    pub cod_munic: Option<i32>,
    /// Municipality name
    #[serde(rename = "NOM_MUNIC")]
    pub nom_munic: Option<String>,
}

/// Code-to-name lookup built from the DIVIPOLA table
///
/// Duplicate code pairs keep their first name, mirroring a de-duplicated
/// reference merge.
#[derive(Debug, Default, Clone)]
pub struct DivisionLookup {
    departments: FxHashMap<i32, String>,
    municipalities: FxHashMap<(i32, i32), String>,
}

impl DivisionLookup {
    /// Build the lookup from canonical DIVIPOLA record batches
    ///
    /// # Errors
    /// Returns an error if a batch cannot be deserialized
    pub fn from_batches(batches: &[RecordBatch]) -> Result<Self> {
        let mut lookup = Self::default();
        for batch in batches {
            let rows: Vec<DivisionRow> = serde_arrow::from_record_batch(batch)
                .map_err(|e| DashboardError::schema(format!("DIVIPOLA deserialization: {e}")))?;
            for row in rows {
                lookup.insert(&row);
            }
        }
        log::info!(
            "Division lookup: {} departments, {} municipalities",
            lookup.departments.len(),
            lookup.municipalities.len()
        );
        Ok(lookup)
    }

    fn insert(&mut self, row: &DivisionRow) {
        if let (Some(dpto), Some(name)) = (row.cod_dpto, row.nom_dpto.as_deref()) {
            self.departments
                .entry(dpto)
                .or_insert_with(|| name.trim().to_string());
        }
        if let (Some(dpto), Some(munic), Some(name)) =
            (row.cod_dpto, row.cod_munic, row.nom_munic.as_deref())
        {
            self.municipalities
                .entry((dpto, munic))
                .or_insert_with(|| name.trim().to_string());
        }
    }

    /// Name of a department, if known
    #[must_use]
    pub fn department_name(&self, cod_dpto: i32) -> Option<&str> {
        self.departments.get(&cod_dpto).map(String::as_str)
    }

    /// Name of a municipality, if known
    #[must_use]
    pub fn municipality_name(&self, cod_dpto: i32, cod_munic: i32) -> Option<&str> {
        self.municipalities
            .get(&(cod_dpto, cod_munic))
            .map(String::as_str)
    }

    /// Department name with the `Desconocido` fallback
    #[must_use]
    pub fn department_label(&self, cod_dpto: Option<i32>) -> String {
        cod_dpto
            .and_then(|code| self.department_name(code))
            .unwrap_or(UNKNOWN_DIVISION)
            .to_string()
    }

    /// Municipality name with the `Desconocido` fallback
    #[must_use]
    pub fn municipality_label(&self, cod_dpto: Option<i32>, cod_munic: Option<i32>) -> String {
        match (cod_dpto, cod_munic) {
            (Some(d), Some(m)) => self
                .municipality_name(d, m)
                .unwrap_or(UNKNOWN_DIVISION)
                .to_string(),
            _ => UNKNOWN_DIVISION.to_string(),
        }
    }

    /// Number of known municipalities
    #[must_use]
    pub fn len(&self) -> usize {
        self.municipalities.len()
    }

    /// Whether the lookup holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.municipalities.is_empty() && self.departments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        dpto: i32,
        nom_dpto: &str,
        munic: i32,
        nom_munic: &str,
    ) -> DivisionRow {
        DivisionRow {
            cod_dpto: Some(dpto),
            nom_dpto: Some(nom_dpto.to_string()),
            cod_munic: Some(munic),
            nom_munic: Some(nom_munic.to_string()),
        }
    }

    #[test]
    fn first_entry_wins_on_duplicates() {
        let mut lookup = DivisionLookup::default();
        lookup.insert(&row(5, "ANTIOQUIA", 1, "MEDELLIN"));
        lookup.insert(&row(5, "Antioquia (dup)", 1, "Medellin (dup)"));

        assert_eq!(lookup.department_name(5), Some("ANTIOQUIA"));
        assert_eq!(lookup.municipality_name(5, 1), Some("MEDELLIN"));
    }

    #[test]
    fn unknown_codes_fall_back_to_desconocido() {
        let lookup = DivisionLookup::default();
        assert_eq!(lookup.department_label(Some(99)), UNKNOWN_DIVISION);
        assert_eq!(lookup.municipality_label(None, Some(1)), UNKNOWN_DIVISION);
    }
}
