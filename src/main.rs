use log::info;
use vitales::{DashboardConfig, Result, load_dashboard, server};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = DashboardConfig::from_env();
    if std::env::args().any(|arg| arg == "--demo") {
        config.demo = true;
    }

    if config.demo {
        info!("Starting in demo mode with synthetic data");
    } else {
        info!(
            "Loading extracts: {} | {} | {}",
            config.mortality_path.display(),
            config.codes_path.display(),
            config.divipola_path.display()
        );
    }

    let start = std::time::Instant::now();
    let dashboard = load_dashboard(&config).await?;
    info!(
        "Loaded {} records in {:?}",
        dashboard.data.num_rows(),
        start.elapsed()
    );

    server::serve(dashboard, &config).await
}
