pub mod config;
pub mod paths;
pub mod store;

pub use config::{CatalogConfig, Config, LoggingConfig, WatchlistConfig, DEFAULT_WATCHLIST_KEY};
pub use paths::{home_override, PathManager};
pub use store::{KeyValueStore, LocalStore, MemoryStore, StoreError};
