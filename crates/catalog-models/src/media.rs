use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of catalog entry. Anything the datasets carry besides movies and
/// series (episodes, games) lands in `Unknown` and is ignored by type queries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ContentType {
    /// Map an IMDb "Title Type" label ("Movie", "TV Series", "TV Mini Series", ...)
    pub fn from_title_type(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        match label.as_str() {
            "movie" | "tv movie" | "short" | "video" => ContentType::Movie,
            "series" | "tv series" | "tv mini series" | "tv mini-series" => ContentType::Series,
            _ => ContentType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Series => "series",
            ContentType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "movies" => Ok(ContentType::Movie),
            "series" | "show" | "shows" | "tv" => Ok(ContentType::Series),
            other => Err(format!("Invalid content type: {}. Use 'movie' or 'series'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_title_type() {
        assert_eq!(ContentType::from_title_type("Movie"), ContentType::Movie);
        assert_eq!(ContentType::from_title_type("TV Series"), ContentType::Series);
        assert_eq!(ContentType::from_title_type("TV Mini Series"), ContentType::Series);
        assert_eq!(ContentType::from_title_type("Video Game"), ContentType::Unknown);
    }

    #[test]
    fn test_content_type_unknown_label_deserializes() {
        let parsed: ContentType = serde_json::from_str("\"episode\"").unwrap();
        assert_eq!(parsed, ContentType::Unknown);
        let parsed: ContentType = serde_json::from_str("\"series\"").unwrap();
        assert_eq!(parsed, ContentType::Series);
    }
}
