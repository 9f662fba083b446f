//! Table source loaders
//!
//! Each DANE extract has a loader implementing [`TableSource`]: read the
//! file, bring raw headers onto canonical names, project onto the canonical
//! schema. The cause-code table is the outlier — its schema is unknown, and a
//! missing file degrades to an empty table instead of failing startup.

pub mod codigos;
pub mod divipola;
pub mod nofetal;

use std::path::Path;

use arrow::record_batch::RecordBatch;
use arrow_schema::SchemaRef;

pub use codigos::CodigosSource;
pub use divipola::DivipolaSource;
pub use nofetal::NoFetalSource;

use crate::error::Result;
use crate::schema::{project_to_schema, rename_columns};

/// A loadable DANE table source
pub trait TableSource {
    /// Short name of the source
    fn name(&self) -> &'static str;

    /// Canonical schema, or `None` when the source is schema-dynamic
    fn canonical_schema(&self) -> Option<SchemaRef>;

    /// Raw-to-canonical column renames for this source
    fn renames(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    /// Load records from the source path
    ///
    /// # Arguments
    /// * `path` - File or directory holding the extract
    /// * `strict` - Whether schema issues fail the load
    ///
    /// # Returns
    /// * `Result<Vec<RecordBatch>>` - canonical record batches
    fn load(&self, path: &Path, strict: bool) -> Result<Vec<RecordBatch>>;
}

/// Rename and project raw batches onto a source's canonical shape
pub(crate) fn normalize(
    source: &dyn TableSource,
    batches: Vec<RecordBatch>,
    strict: bool,
) -> Result<Vec<RecordBatch>> {
    let mut normalized = Vec::with_capacity(batches.len());
    for batch in &batches {
        let renamed = rename_columns(batch, source.renames())?;
        match source.canonical_schema() {
            Some(schema) => {
                let (projected, report) = project_to_schema(&renamed, &schema, strict)?;
                if !report.compatible() {
                    log::warn!(
                        "{}: {} schema issue(s) while projecting",
                        source.name(),
                        report.issues.len()
                    );
                }
                normalized.push(projected);
            }
            None => normalized.push(renamed),
        }
    }
    Ok(normalized)
}
