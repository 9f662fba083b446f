//! Configuration for the dashboard.

use std::path::PathBuf;

/// Configuration for data sources and the HTTP server
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Path to the non-fetal mortality extract (xlsx or parquet)
    pub mortality_path: PathBuf,
    /// Path to the cause-of-death code table
    pub codes_path: PathBuf,
    /// Path to the DIVIPOLA division table
    pub divipola_path: PathBuf,
    /// Host to bind the HTTP server to
    pub host: String,
    /// Port to bind the HTTP server to
    pub port: u16,
    /// Whether a missing required column fails the load
    pub strict_schema: bool,
    /// Serve synthetic demo data instead of reading the extracts
    pub demo: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from("Anexos");
        Self {
            mortality_path: data_dir.join("Anexo1.NoFetal2019_CE_15-03-23.xlsx"),
            codes_path: data_dir.join("Anexo2.CodigosDeMuerte_CE_15-03-23.xlsx"),
            divipola_path: data_dir.join("Divipola_CE_.xlsx"),
            host: "0.0.0.0".to_string(),
            port: 8050,
            strict_schema: false,
            demo: false,
        }
    }
}

impl DashboardConfig {
    /// Build a configuration from environment variables, falling back to defaults
    ///
    /// Recognized variables: `VITALES_DATA_DIR` (re-roots the three default
    /// file names), `VITALES_MORTALITY`, `VITALES_CODES`, `VITALES_DIVIPOLA`,
    /// `VITALES_DEMO`, `VITALES_STRICT_SCHEMA`, `HOST` and `PORT`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("VITALES_DATA_DIR") {
            let dir = PathBuf::from(dir);
            config.mortality_path = dir.join("Anexo1.NoFetal2019_CE_15-03-23.xlsx");
            config.codes_path = dir.join("Anexo2.CodigosDeMuerte_CE_15-03-23.xlsx");
            config.divipola_path = dir.join("Divipola_CE_.xlsx");
        }
        if let Ok(path) = std::env::var("VITALES_MORTALITY") {
            config.mortality_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("VITALES_CODES") {
            config.codes_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("VITALES_DIVIPOLA") {
            config.divipola_path = PathBuf::from(path);
        }
        if let Ok(host) = std::env::var("HOST") {
            config.host = host;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            config.port = port;
        }
        config.demo = env_flag("VITALES_DEMO");
        config.strict_schema = env_flag("VITALES_STRICT_SCHEMA");

        config
    }

    /// Socket address string for the HTTP listener
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
