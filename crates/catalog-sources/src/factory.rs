use catalog_models::ContentRecord;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::SourceError;
use crate::imdb::ImdbCsvSource;
use crate::json::JsonSource;
use crate::traits::ContentSource;

/// Pick a loader from the file extension
pub fn source_for_path(path: &Path) -> Result<Box<dyn ContentSource>, SourceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("json") => Ok(Box::new(JsonSource::new(path))),
        Some("csv") => Ok(Box::new(ImdbCsvSource::new(path))),
        _ => Err(SourceError::UnsupportedFormat(path.to_path_buf())),
    }
}

pub fn load_source(path: &Path) -> Result<Vec<ContentRecord>, SourceError> {
    source_for_path(path)?.load()
}

/// Load every source in order, one record list per source
pub fn load_sources(paths: &[PathBuf]) -> Result<Vec<Vec<ContentRecord>>, SourceError> {
    let mut lists = Vec::with_capacity(paths.len());
    for path in paths {
        let source = source_for_path(path)?;
        let records = source.load()?;
        info!(
            source = source.source_name(),
            path = %path.display(),
            count = records.len(),
            "Loaded catalog source"
        );
        lists.push(records);
    }
    Ok(lists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_load_sources_keeps_order() {
        let mut json = Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(json, r#"[{{"imdbID": "tt1", "Title": "From JSON"}}]"#).unwrap();

        let mut csv = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(csv, "Const,Title,Title Type").unwrap();
        writeln!(csv, "tt2,From CSV,Movie").unwrap();

        let lists = load_sources(&[json.path().to_path_buf(), csv.path().to_path_buf()]).unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0][0].title, "From JSON");
        assert_eq!(lists[1][0].title, "From CSV");
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_source(Path::new("catalog.xml")).unwrap_err();
        assert!(matches!(err, SourceError::UnsupportedFormat(_)));
    }
}
