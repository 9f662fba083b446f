//! Startup data loading and dashboard assembly
//!
//! The three sources load concurrently on blocking threads; the joined
//! dataset and the cause catalog are then assembled once and shared immutably
//! with the HTTP layer.

use anyhow::anyhow;
use chrono::{DateTime, Local};

use crate::codes::CauseCatalog;
use crate::config::DashboardConfig;
use crate::dataset::MortalityData;
use crate::demo;
use crate::error::Result;
use crate::model::DivisionLookup;
use crate::registry::{CodigosSource, DivipolaSource, NoFetalSource, TableSource};

/// Number of synthetic records generated in demo mode
const DEMO_ROWS: usize = 20_000;

/// Everything the HTTP layer serves
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// The joined mortality dataset
    pub data: MortalityData,
    /// Resolved cause-code catalog
    pub catalog: CauseCatalog,
    /// When the data finished loading
    pub loaded_at: DateTime<Local>,
}

/// Load the three extracts and assemble the dashboard state
///
/// # Errors
/// Returns an error if the mortality or DIVIPOLA extract cannot be loaded;
/// a failed code table only degrades the catalog
pub async fn load_dashboard(config: &DashboardConfig) -> Result<Dashboard> {
    if config.demo {
        log::info!("Demo mode: generating {DEMO_ROWS} synthetic records");
        return assemble(
            vec![demo::demo_mortality_batch(DEMO_ROWS, 2019)?],
            vec![demo::demo_codes_batch()?],
            vec![demo::demo_division_batch()?],
        );
    }

    let strict = config.strict_schema;

    let mortality_path = config.mortality_path.clone();
    let mortality_task =
        tokio::task::spawn_blocking(move || NoFetalSource::new().load(&mortality_path, strict));

    let codes_path = config.codes_path.clone();
    let codes_task =
        tokio::task::spawn_blocking(move || CodigosSource::new().load(&codes_path, strict));

    let divipola_path = config.divipola_path.clone();
    let divipola_task =
        tokio::task::spawn_blocking(move || DivipolaSource::new().load(&divipola_path, strict));

    let (mortality, codes, divipola) =
        futures::try_join!(mortality_task, codes_task, divipola_task)
            .map_err(|e| anyhow!("Data loading task failed: {e}"))?;

    assemble(mortality?, codes?, divipola?)
}

fn assemble(
    mortality: Vec<arrow::record_batch::RecordBatch>,
    codes: Vec<arrow::record_batch::RecordBatch>,
    divipola: Vec<arrow::record_batch::RecordBatch>,
) -> Result<Dashboard> {
    let divisions = DivisionLookup::from_batches(&divipola)?;
    let data = MortalityData::assemble(&mortality, divisions)?;
    let observed = data.observed_causes()?;
    let catalog = CauseCatalog::resolve(&codes, &observed);

    log::info!(
        "Dashboard ready: {} records, {} cause codes mapped",
        data.num_rows(),
        catalog.len()
    );

    Ok(Dashboard {
        data,
        catalog,
        loaded_at: Local::now(),
    })
}
