use catalog_models::ContentRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::SourceError;
use crate::traits::ContentSource;

/// Bundled dataset file: a JSON array of OMDb-style records
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContentSource for JsonSource {
    fn source_name(&self) -> &str {
        "json"
    }

    fn load(&self) -> Result<Vec<ContentRecord>, SourceError> {
        load_json(&self.path)
    }
}

pub fn load_json(path: &Path) -> Result<Vec<ContentRecord>, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_json_records(&content).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Decode a JSON array element by element.
///
/// Only a document that is not an array fails. Elements that do not decode as
/// a record are skipped, so one bad entry never drops the whole dataset.
pub fn parse_json_records(content: &str) -> Result<Vec<ContentRecord>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(content)?;
    let total = values.len();
    let mut records = Vec::with_capacity(total);

    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<ContentRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed catalog record");
            }
        }
    }

    debug!("Decoded {} of {} JSON elements", records.len(), total);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_models::ContentType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_json_records_skips_bad_elements() {
        let content = r#"[
            {"imdbID": "tt0111161", "Title": "The Shawshank Redemption", "Type": "movie", "imdbRating": "9.3"},
            42,
            {"imdbID": "tt0944947", "Title": "Game of Thrones", "Type": "series", "Year": "2011–2019"},
            {"imdbID": "tt9", "Title": ["not", "a", "string"]}
        ]"#;

        let records = parse_json_records(content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "tt0111161");
        assert_eq!(records[1].content_type, ContentType::Series);
    }

    #[test]
    fn test_parse_json_records_keeps_records_with_null_fields() {
        let content = r#"[
            {"imdbID": "tt1", "Title": null, "Type": "movie"},
            {"imdbID": "tt2", "Title": "Two", "Type": null},
            {"imdbID": "tt3", "Title": "Three", "ComingSoon": null},
            {"imdbID": "tt4", "Title": "Four", "Images": null}
        ]"#;

        let records = parse_json_records(content).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt2", "tt3", "tt4"]);
        assert_eq!(records[0].title, "");
        assert_eq!(records[1].content_type, ContentType::Unknown);
        assert!(!records[2].coming_soon);
        assert!(records[3].images.is_empty());
    }

    #[test]
    fn test_parse_json_records_rejects_non_array() {
        assert!(parse_json_records(r#"{"imdbID": "tt1"}"#).is_err());
        assert!(parse_json_records("not json").is_err());
    }

    #[test]
    fn test_load_json_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"[{{"imdbID": "tt1", "Title": "One"}}]"#).unwrap();

        let source = JsonSource::new(file.path());
        let records = source.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "One");
    }

    #[test]
    fn test_load_json_missing_file() {
        let err = load_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
