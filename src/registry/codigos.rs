//! Cause-of-death code table source
//!
//! The published code table changes shape between releases, so this source
//! keeps the raw headers (schema-dynamic) and leaves column identification to
//! the cause catalog. A missing or unreadable file is tolerated: the catalog
//! falls back to its constant dictionary.

use std::path::Path;

use arrow::record_batch::RecordBatch;
use arrow_schema::SchemaRef;

use super::TableSource;
use crate::error::Result;
use crate::reader::read_table;
use crate::utils::log_warning;

/// Loader for the cause-of-death code table
#[derive(Debug, Clone, Default)]
pub struct CodigosSource;

impl CodigosSource {
    /// Create a new code table loader
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TableSource for CodigosSource {
    fn name(&self) -> &'static str {
        "CODIGOS_MUERTE"
    }

    fn canonical_schema(&self) -> Option<SchemaRef> {
        None
    }

    fn load(&self, path: &Path, _strict: bool) -> Result<Vec<RecordBatch>> {
        match read_table(path) {
            Ok(batches) => {
                let rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
                log::info!("Cause code table loaded: {rows} records");
                Ok(batches)
            }
            Err(e) => {
                log_warning(
                    &format!("Could not load cause code table ({e}), continuing without it"),
                    Some(path),
                );
                Ok(Vec::new())
            }
        }
    }
}
