use catalog_models::fields::{clean_text, parse_rating, parse_votes};
use catalog_models::{ContentRecord, ContentType};
use csv::Reader;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{self, debug};

use crate::error::SourceError;
use crate::traits::ContentSource;

const REQUIRED_COLUMNS: [&str; 2] = ["Const", "Title"];

/// IMDb list or ratings export (CSV)
pub struct ImdbCsvSource {
    path: PathBuf,
}

impl ImdbCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContentSource for ImdbCsvSource {
    fn source_name(&self) -> &str {
        "imdb-csv"
    }

    fn load(&self) -> Result<Vec<ContentRecord>, SourceError> {
        load_csv(&self.path)
    }
}

/// Parse an IMDb export into catalog records
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<ContentRecord>, SourceError> {
    let path = path.as_ref();
    let csv_error = |source: csv::Error| SourceError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = Reader::from_path(path).map_err(csv_error)?;
    let mut records = Vec::new();

    // Read header
    let headers = reader.headers().map_err(csv_error)?.clone();
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_string(), i))
        .collect();

    let available_columns: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    tracing::debug!("Available CSV columns: {:?}", available_columns);

    for col in &REQUIRED_COLUMNS {
        if !header_map.contains_key(*col) {
            return Err(SourceError::MissingColumn {
                path: path.to_path_buf(),
                column: col.to_string(),
                available: available_columns,
            });
        }
    }

    let mut row_count = 0;
    for result in reader.records() {
        let row = result.map_err(csv_error)?;
        row_count += 1;

        let field = |column: &str| column_value(&row, &header_map, column).to_string();

        let imdb_id = field("Const").trim().to_string();
        if imdb_id.is_empty() {
            debug!(row = row_count, "Skipping row with empty IMDB ID");
            continue;
        }

        let title_type = field("Title Type");
        let content_type = ContentType::from_title_type(&title_type);
        if content_type == ContentType::Unknown && !title_type.is_empty() {
            debug!(
                row = row_count,
                title_type = %title_type,
                "Keeping row with unrecognized title type"
            );
        }

        let mut record = ContentRecord::new(imdb_id, field("Title").trim(), content_type);
        record.year = clean_text(&field("Year"));
        record.genre = clean_text(&field("Genres"));
        record.rating = parse_rating(&field("IMDb Rating"));
        record.vote_count = parse_votes(&field("Num Votes"));
        record.release_date = clean_text(&field("Release Date"));
        record.director = clean_text(&field("Directors"));
        record.runtime = clean_text(&field("Runtime (mins)")).map(|mins| format!("{} min", mins));

        if row_count <= 3 {
            debug!(
                row = row_count,
                imdb_id = %record.id,
                title = %record.title,
                content_type = %record.content_type,
                "Parsed catalog CSV row"
            );
        }

        records.push(record);
    }

    tracing::info!("Parsed {} total rows, {} catalog records", row_count, records.len());
    Ok(records)
}

fn column_value<'r>(row: &'r csv::StringRecord, header_map: &HashMap<String, usize>, column: &str) -> &'r str {
    header_map
        .get(column)
        .and_then(|&i| row.get(i))
        .unwrap_or("")
}
