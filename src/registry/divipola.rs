//! DIVIPOLA division table source

use std::path::Path;

use arrow::record_batch::RecordBatch;
use arrow_schema::SchemaRef;

use super::{TableSource, normalize};
use crate::error::Result;
use crate::reader::read_table;
use crate::schema::divipola_schema;
use crate::schema::field_mapping::DIVIPOLA_RENAMES;

/// Loader for the political-administrative division table
#[derive(Debug, Clone)]
pub struct DivipolaSource {
    schema: SchemaRef,
}

impl DivipolaSource {
    /// Create a new DIVIPOLA source loader
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: divipola_schema(),
        }
    }
}

impl Default for DivipolaSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSource for DivipolaSource {
    fn name(&self) -> &'static str {
        "DIVIPOLA"
    }

    fn canonical_schema(&self) -> Option<SchemaRef> {
        Some(self.schema.clone())
    }

    fn renames(&self) -> &'static [(&'static str, &'static str)] {
        DIVIPOLA_RENAMES
    }

    fn load(&self, path: &Path, strict: bool) -> Result<Vec<RecordBatch>> {
        let batches = read_table(path)?;
        normalize(self, batches, strict)
    }
}
