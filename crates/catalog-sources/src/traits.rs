use catalog_models::ContentRecord;

use crate::error::SourceError;

/// A provider of one ordered list of catalog records
pub trait ContentSource {
    /// Short label used in logs ("json", "imdb-csv")
    fn source_name(&self) -> &str;

    fn load(&self) -> Result<Vec<ContentRecord>, SourceError>;
}
