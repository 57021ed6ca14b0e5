use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Storage key the storefront has always used for the watchlist blob
pub const DEFAULT_WATCHLIST_KEY: &str = "prime-video-watchlist";

const SUPPORTED_SOURCE_EXTENSIONS: [&str; 2] = ["json", "csv"];

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub watchlist: WatchlistConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Dataset files in load order; earlier files win on duplicate ids
    #[serde(default = "default_sources")]
    pub sources: Vec<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WatchlistConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Overrides the store location from `PathManager`
    #[serde(default)]
    pub store_file: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    pub file: Option<PathBuf>,
}

fn default_sources() -> Vec<PathBuf> {
    vec![PathBuf::from("data/catalog.json")]
}

fn default_storage_key() -> String {
    DEFAULT_WATCHLIST_KEY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
        }
    }
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            store_file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.catalog.sources.is_empty() {
            return Err(anyhow::anyhow!("catalog.sources is required and cannot be empty"));
        }

        for source in &self.catalog.sources {
            let extension = source
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase())
                .unwrap_or_default();
            if !SUPPORTED_SOURCE_EXTENSIONS.contains(&extension.as_str()) {
                return Err(anyhow::anyhow!(
                    "Unsupported catalog source {}: expected a .json or .csv file",
                    source.display()
                ));
            }
        }

        if self.watchlist.storage_key.trim().is_empty() {
            return Err(anyhow::anyhow!("watchlist.storage_key cannot be empty"));
        }

        Ok(())
    }

    /// Resolve relative source paths against `base` (usually the config file's directory)
    pub fn resolved_sources(&self, base: &Path) -> Vec<PathBuf> {
        self.catalog
            .sources
            .iter()
            .map(|source| {
                if source.is_absolute() {
                    source.clone()
                } else {
                    base.join(source)
                }
            })
            .collect()
    }
}
