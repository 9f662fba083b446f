//! Non-fetal mortality source
//!
//! One row per registered death in the 2019 extract.

use std::path::Path;

use arrow::record_batch::RecordBatch;
use arrow_schema::SchemaRef;

use super::{TableSource, normalize};
use crate::error::Result;
use crate::reader::read_table;
use crate::schema::field_mapping::MORTALITY_RENAMES;
use crate::schema::mortality_schema;

/// Loader for the non-fetal mortality extract
#[derive(Debug, Clone)]
pub struct NoFetalSource {
    schema: SchemaRef,
}

impl NoFetalSource {
    /// Create a new mortality source loader
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: mortality_schema(),
        }
    }
}

impl Default for NoFetalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSource for NoFetalSource {
    fn name(&self) -> &'static str {
        "NOFETAL"
    }

    fn canonical_schema(&self) -> Option<SchemaRef> {
        Some(self.schema.clone())
    }

    fn renames(&self) -> &'static [(&'static str, &'static str)] {
        MORTALITY_RENAMES
    }

    fn load(&self, path: &Path, strict: bool) -> Result<Vec<RecordBatch>> {
        let batches = read_table(path)?;
        normalize(self, batches, strict)
    }
}
