//! Shared in-memory fixtures for the integration suites
//!
//! A small hand-authored dataset with known aggregates: five municipalities,
//! eleven death records across two batches, one out-of-range month, one
//! unknown division pair, and one row with null codes.

use std::sync::Arc;

use arrow::array::{Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use vitales::codes::CauseCatalog;
use vitales::dataset::MortalityData;
use vitales::model::DivisionLookup;
use vitales::schema::{divipola_schema, mortality_schema};

/// Canonical DIVIPOLA batch with five municipalities
pub fn divipola_batch() -> RecordBatch {
    RecordBatch::try_new(
        divipola_schema(),
        vec![
            Arc::new(Int32Array::from(vec![5, 5, 8, 11, 13])),
            Arc::new(StringArray::from(vec![
                "ANTIOQUIA",
                "ANTIOQUIA",
                "ATLANTICO",
                "BOGOTA D.C.",
                "BOLIVAR",
            ])),
            Arc::new(Int32Array::from(vec![1, 360, 1, 1, 1])),
            Arc::new(StringArray::from(vec![
                "MEDELLIN",
                "ITAGUI",
                "BARRANQUILLA",
                "BOGOTA D.C.",
                "CARTAGENA",
            ])),
        ],
    )
    .unwrap()
}

fn mortality_batch(
    rows: &[(Option<i32>, Option<i32>, i32, i32, i32, i32, &str)],
) -> RecordBatch {
    RecordBatch::try_new(
        mortality_schema(),
        vec![
            Arc::new(Int32Array::from(rows.iter().map(|r| r.0).collect::<Vec<_>>())),
            Arc::new(Int32Array::from(rows.iter().map(|r| r.1).collect::<Vec<_>>())),
            Arc::new(Int32Array::from(
                rows.iter().map(|r| Some(r.2)).collect::<Vec<_>>(),
            )),
            Arc::new(Int32Array::from(
                rows.iter().map(|r| Some(r.3)).collect::<Vec<_>>(),
            )),
            Arc::new(Int32Array::from(
                rows.iter().map(|r| Some(r.4)).collect::<Vec<_>>(),
            )),
            Arc::new(Int32Array::from(
                rows.iter().map(|r| Some(r.5)).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| Some(r.6)).collect::<Vec<_>>(),
            )),
        ],
    )
    .unwrap()
}

/// Two mortality batches with eleven records total
pub fn mortality_batches() -> Vec<RecordBatch> {
    vec![
        mortality_batch(&[
            (Some(5), Some(1), 2019, 1, 1, 12, "X954"),
            (Some(5), Some(1), 2019, 1, 2, 12, "I219"),
            (Some(5), Some(360), 2019, 2, 1, 17, "X950"),
            (Some(5), Some(1), 2019, 2, 1, 12, "X954"),
            (Some(8), Some(1), 2019, 3, 2, 20, "I10"),
            (Some(8), Some(1), 2019, 3, 1, 20, "X954"),
        ]),
        mortality_batch(&[
            (Some(11), Some(1), 2019, 4, 3, 29, "J449"),
            (Some(11), Some(1), 2019, 5, 1, 5, "I219"),
            // Month 13 is out of range, division 99/999 is not in DIVIPOLA
            (Some(13), Some(1), 2019, 13, 1, 7, "C349"),
            (Some(99), Some(999), 2019, 6, 2, 9, "I219"),
            (None, None, 2019, 7, 1, 12, "I10"),
        ]),
    ]
}

/// The assembled fixture dataset
pub fn dataset() -> MortalityData {
    let divisions = DivisionLookup::from_batches(&[divipola_batch()]).unwrap();
    MortalityData::assemble(&mortality_batches(), divisions).unwrap()
}

/// A catalog resolved from a canonical code table
pub fn catalog() -> CauseCatalog {
    let schema = Arc::new(Schema::new(vec![
        Field::new("CODIGO_CIE10", DataType::Utf8, true),
        Field::new("DESCRIPCION_CIE10", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(vec!["I219", "I10", "C349", "J449"])),
            Arc::new(StringArray::from(vec![
                "Infarto agudo del miocardio",
                "Hipertensión esencial",
                "Cáncer de pulmón",
                "Enfermedad pulmonar obstructiva crónica",
            ])),
        ],
    )
    .unwrap();
    CauseCatalog::resolve(&[batch], &std::collections::HashSet::new())
}
