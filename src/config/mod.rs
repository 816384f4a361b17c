mod defaults;
mod types;
mod validation;

pub use defaults::*;
pub use types::*;
pub use validation::*;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Top-level sitesearch configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Config file names probed in the working directory, in order.
const CONFIG_FILE_CANDIDATES: &[&str] = &["sitesearch.json", "sitesearch.json5"];

impl Config {
    /// Load configuration from file, environment, and defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path
            .map(PathBuf::from)
            .or_else(find_config_file)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_CANDIDATES[0]));

        let mut config = if config_path.exists() {
            info!("Loading config from {}", config_path.display());
            load_config_file(&config_path)?
        } else {
            info!("No config file found, using defaults");
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Write default configuration to a file.
    pub fn write_default(path: &str) -> Result<()> {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Apply environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("SITESEARCH_BASE_URL") {
            self.sources.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("SITESEARCH_TIMEOUT_MS") {
            if let Ok(timeout) = timeout.parse() {
                self.http.timeout_ms = timeout;
            }
        }
    }
}

/// Find the configuration file in the working directory.
fn find_config_file() -> Option<PathBuf> {
    CONFIG_FILE_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Load configuration from a file path. Accepts JSON5, a superset of JSON.
fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    let config = json5::from_str(&content)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
    Ok(config)
}
