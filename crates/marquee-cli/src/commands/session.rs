use crate::output::Output;
use catalog_config::{Config, KeyValueStore, LocalStore, MemoryStore, PathManager};
use catalog_core::{ContentRepository, SelectionStore};
use color_eyre::Result;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::warn;

pub type Selection = SelectionStore<Box<dyn KeyValueStore>>;

/// Directory relative catalog sources are resolved against
pub fn config_base(config_path: &Path) -> PathBuf {
    if config_path.exists() {
        if let Some(parent) = config_path.parent() {
            return parent.to_path_buf();
        }
    }
    // Without a config file the defaults point into the working directory
    PathBuf::from(".")
}

/// Validate the config and load every source into one repository
pub fn load_catalog(config: &Config, base: &Path) -> Result<ContentRepository> {
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;

    let sources = config.resolved_sources(base);
    let lists = catalog_sources::load_sources(&sources)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load catalog: {}", e))?;
    Ok(ContentRepository::build(lists))
}

/// Open the watchlist store. An unreadable store file degrades to an
/// in-memory store so browsing keeps working.
pub fn open_selection(config: &Config, paths: &PathManager, output: &Output) -> Selection {
    let store_file = config
        .watchlist
        .store_file
        .clone()
        .unwrap_or_else(|| paths.store_file());

    let storage: Box<dyn KeyValueStore> = match LocalStore::open(store_file.clone()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("Falling back to an in-memory watchlist: {}", e);
            output.warn(format!(
                "Watchlist storage at {} is unreadable; changes will not be saved",
                store_file.display()
            ));
            Box::new(MemoryStore::new())
        }
    };

    SelectionStore::open(storage, config.watchlist.storage_key.clone())
}

/// Seeded runs repeat their picks; unseeded runs use the thread RNG
pub fn rng_for(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    }
}
