//! Canonical table schemas for the three DANE extracts.
//!
//! The raw extracts arrive with inconsistent column names; each source has a
//! rename map in [`field_mapping`] that brings headers onto these canonical
//! schemas before type coercion in [`compat`].

pub mod compat;
pub mod field_mapping;

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};
use arrow_schema::SchemaRef;

pub use compat::{SchemaCompatibilityReport, SchemaIssue, project_to_schema};
pub use field_mapping::rename_columns;

/// Canonical schema for the non-fetal mortality extract
///
/// One row per registered death. All columns are nullable because the raw
/// extract has gaps; rows with null grouped keys are skipped by aggregation.
#[must_use]
pub fn mortality_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("COD_DPTO", DataType::Int32, true),
        Field::new("COD_MUNIC", DataType::Int32, true),
        Field::new("ANO", DataType::Int32, true),
        Field::new("MES", DataType::Int32, true),
        Field::new("SEXO", DataType::Int32, true),
        Field::new("GRUPO_EDAD1", DataType::Int32, true),
        Field::new("CAUSA_DEFUNCION", DataType::Utf8, true),
    ]))
}

/// Canonical schema for the DIVIPOLA division table
#[must_use]
pub fn divipola_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("COD_DPTO", DataType::Int32, true),
        Field::new("NOM_DPTO", DataType::Utf8, true),
        Field::new("COD_MUNIC", DataType::Int32, true),
        Field::new("NOM_MUNIC", DataType::Utf8, true),
    ]))
}
