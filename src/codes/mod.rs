//! ICD-10 cause-code catalog
//!
//! Resolves `CAUSA_DEFUNCION` codes to Spanish descriptions. Resolution is
//! layered: the canonical column pair when the table carries it, the column
//! guessing heuristic otherwise, and a constant dictionary when the table is
//! missing or unusable. Manual overrides win over everything.

pub mod fallback;
pub mod heuristics;

use std::collections::HashSet;

use arrow::array::{Array, StringArray};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;

pub use fallback::UNSPECIFIED_CAUSE;
use fallback::{FALLBACK_DESCRIPTIONS, MANUAL_OVERRIDES};

/// How the catalog mapping was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// The table carried `CODIGO_CIE10` / `DESCRIPCION_CIE10`
    Canonical,
    /// Columns were guessed by shape and header keywords
    Heuristic,
    /// The constant dictionary
    Fallback,
}

/// Code-to-description catalog for causes of death
#[derive(Debug, Clone)]
pub struct CauseCatalog {
    mapping: FxHashMap<String, String>,
    source: CatalogSource,
}

impl CauseCatalog {
    /// Resolve the catalog from code-table batches
    ///
    /// `observed_codes` are the trimmed cause codes present in the mortality
    /// extract; they drive the heuristic's confidence logging.
    #[must_use]
    pub fn resolve(batches: &[RecordBatch], observed_codes: &HashSet<String>) -> Self {
        for batch in batches {
            if let Some(mapping) = canonical_mapping(batch) {
                log::info!("Cause catalog: canonical columns, {} codes", mapping.len());
                return Self {
                    mapping,
                    source: CatalogSource::Canonical,
                };
            }
        }

        let mut combined = FxHashMap::default();
        for batch in batches {
            if let Some(mapping) = heuristics::build_mapping(batch, observed_codes) {
                combined.extend(mapping);
            }
        }
        if !combined.is_empty() {
            log::info!("Cause catalog: guessed columns, {} codes", combined.len());
            return Self {
                mapping: combined,
                source: CatalogSource::Heuristic,
            };
        }

        log::warn!("Cause catalog: falling back to the constant dictionary");
        Self::fallback()
    }

    /// The constant-dictionary catalog
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            mapping: FALLBACK_DESCRIPTIONS
                .iter()
                .map(|(code, desc)| ((*code).to_string(), (*desc).to_string()))
                .collect(),
            source: CatalogSource::Fallback,
        }
    }

    /// Description for a cause code
    ///
    /// Manual overrides win over the resolved mapping; unknown codes yield
    /// `Causa no especificada`.
    #[must_use]
    pub fn describe(&self, code: &str) -> String {
        let code = code.trim();
        if let Some((_, desc)) = MANUAL_OVERRIDES.iter().find(|(c, _)| *c == code) {
            return (*desc).to_string();
        }
        self.mapping
            .get(code)
            .cloned()
            .unwrap_or_else(|| UNSPECIFIED_CAUSE.to_string())
    }

    /// How the mapping was obtained
    #[must_use]
    pub fn source(&self) -> CatalogSource {
        self.source
    }

    /// Number of mapped codes
    #[must_use]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Whether the catalog maps no codes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

/// Direct mapping when the canonical column pair is present
fn canonical_mapping(batch: &RecordBatch) -> Option<FxHashMap<String, String>> {
    let codes = batch
        .column_by_name("CODIGO_CIE10")?
        .as_any()
        .downcast_ref::<StringArray>()?;
    let descriptions = batch
        .column_by_name("DESCRIPCION_CIE10")?
        .as_any()
        .downcast_ref::<StringArray>()?;

    let mut mapping = FxHashMap::default();
    for row in 0..codes.len() {
        if codes.is_null(row) || descriptions.is_null(row) {
            continue;
        }
        let code = codes.value(row).trim();
        let description = descriptions.value(row).trim();
        if !code.is_empty() && !description.is_empty() {
            mapping.insert(code.to_string(), description.to_string());
        }
    }
    (!mapping.is_empty()).then_some(mapping)
}
