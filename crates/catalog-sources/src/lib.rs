pub mod error;
pub mod factory;
pub mod imdb;
pub mod json;
pub mod traits;

pub use error::SourceError;
pub use factory::{load_source, load_sources, source_for_path};
pub use imdb::{load_csv, ImdbCsvSource};
pub use json::{load_json, parse_json_records, JsonSource};
pub use traits::ContentSource;
