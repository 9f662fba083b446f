//! Synthetic demo data
//!
//! Seeded sample batches shaped like the real extracts, so the dashboard can
//! run without the DANE files. The same generator backs the integration test
//! fixtures.

use std::sync::Arc;

use arrow::array::{Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::schema::{divipola_schema, mortality_schema};

/// Demo municipalities: (dept code, dept name, munic code, munic name)
const DEMO_DIVISIONS: &[(i32, &str, i32, &str)] = &[
    (5, "ANTIOQUIA", 1, "MEDELLIN"),
    (5, "ANTIOQUIA", 360, "ITAGUI"),
    (8, "ATLANTICO", 1, "BARRANQUILLA"),
    (11, "BOGOTA, D.C.", 1, "BOGOTA, D.C."),
    (13, "BOLIVAR", 1, "CARTAGENA"),
    (76, "VALLE DEL CAUCA", 1, "CALI"),
    (76, "VALLE DEL CAUCA", 520, "PALMIRA"),
];

/// Demo cause codes sampled into the mortality rows
const DEMO_CAUSES: &[&str] = &[
    "I219", "J449", "C349", "I64", "I10", "C509", "C61", "E149", "K729", "X954", "X950", "J189",
];

/// Demo cause descriptions for the canonical code table
const DEMO_CAUSE_TABLE: &[(&str, &str)] = &[
    ("I219", "Infarto agudo del miocardio"),
    ("J449", "Enfermedad pulmonar obstructiva crónica"),
    ("C349", "Cáncer de pulmón"),
    ("I64", "Accidente cerebrovascular"),
    ("I10", "Hipertensión esencial"),
    ("C509", "Cáncer de mama"),
    ("C61", "Cáncer de próstata"),
    ("E149", "Diabetes mellitus no especificada"),
    ("K729", "Enfermedad hepática"),
    ("X950", "Agresión con disparo de otras armas de fuego"),
];

/// A canonical DIVIPOLA batch covering the demo municipalities
///
/// # Errors
/// Returns an error if batch construction fails
pub fn demo_division_batch() -> Result<RecordBatch> {
    let batch = RecordBatch::try_new(
        divipola_schema(),
        vec![
            Arc::new(Int32Array::from(
                DEMO_DIVISIONS.iter().map(|d| d.0).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                DEMO_DIVISIONS.iter().map(|d| d.1).collect::<Vec<_>>(),
            )),
            Arc::new(Int32Array::from(
                DEMO_DIVISIONS.iter().map(|d| d.2).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                DEMO_DIVISIONS.iter().map(|d| d.3).collect::<Vec<_>>(),
            )),
        ],
    )?;
    Ok(batch)
}

/// A canonical mortality batch of `rows` sampled death records
///
/// # Errors
/// Returns an error if batch construction fails
pub fn demo_mortality_batch(rows: usize, seed: u64) -> Result<RecordBatch> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut dptos = Vec::with_capacity(rows);
    let mut munics = Vec::with_capacity(rows);
    let mut years = Vec::with_capacity(rows);
    let mut months = Vec::with_capacity(rows);
    let mut sexes = Vec::with_capacity(rows);
    let mut ages = Vec::with_capacity(rows);
    let mut causes = Vec::with_capacity(rows);

    for _ in 0..rows {
        let division = DEMO_DIVISIONS[rng.random_range(0..DEMO_DIVISIONS.len())];
        dptos.push(division.0);
        munics.push(division.2);
        years.push(2019);
        months.push(rng.random_range(1..=12));
        sexes.push(match rng.random_range(0..100) {
            0..=48 => 1,
            49..=97 => 2,
            _ => 3,
        });
        ages.push(rng.random_range(0..=29));
        causes.push(DEMO_CAUSES[rng.random_range(0..DEMO_CAUSES.len())]);
    }

    let batch = RecordBatch::try_new(
        mortality_schema(),
        vec![
            Arc::new(Int32Array::from(dptos)),
            Arc::new(Int32Array::from(munics)),
            Arc::new(Int32Array::from(years)),
            Arc::new(Int32Array::from(months)),
            Arc::new(Int32Array::from(sexes)),
            Arc::new(Int32Array::from(ages)),
            Arc::new(StringArray::from(causes)),
        ],
    )?;
    Ok(batch)
}

/// A cause-code table batch with the canonical column pair
///
/// # Errors
/// Returns an error if batch construction fails
pub fn demo_codes_batch() -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("CODIGO_CIE10", DataType::Utf8, true),
        Field::new("DESCRIPCION_CIE10", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(
                DEMO_CAUSE_TABLE.iter().map(|c| c.0).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                DEMO_CAUSE_TABLE.iter().map(|c| c.1).collect::<Vec<_>>(),
            )),
        ],
    )?;
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_batches_are_canonical_and_seeded() {
        let mortality = demo_mortality_batch(100, 42).unwrap();
        assert_eq!(mortality.num_rows(), 100);
        assert_eq!(mortality.schema(), mortality_schema());

        // Same seed, same data
        let again = demo_mortality_batch(100, 42).unwrap();
        assert_eq!(mortality, again);

        let divisions = demo_division_batch().unwrap();
        assert_eq!(divisions.num_rows(), DEMO_DIVISIONS.len());
    }
}
