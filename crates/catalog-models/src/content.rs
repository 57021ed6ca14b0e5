use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields;
use crate::media::ContentType;

/// One catalog entry (movie or series).
///
/// Field names on the wire follow the bundled datasets (OMDb style), so a
/// record read from a dataset and a record written to the watchlist blob have
/// the same shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentRecord {
    #[serde(rename = "imdbID", default, with = "fields::text")]
    pub id: String,
    #[serde(rename = "Title", default, with = "fields::text")]
    pub title: String,
    #[serde(rename = "Type", default, deserialize_with = "fields::null_as_default")]
    pub content_type: ContentType,
    /// Raw comma-delimited genre text ("Action, Sci-Fi")
    #[serde(rename = "Genre", default, with = "fields::optional_text", skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Single year or a running range ("2011–")
    #[serde(rename = "Year", default, with = "fields::optional_text", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(rename = "imdbRating", default, with = "fields::rating")]
    pub rating: Option<f64>,
    #[serde(rename = "imdbVotes", default, with = "fields::votes")]
    pub vote_count: Option<u64>,
    #[serde(rename = "Awards", default, with = "fields::optional_text", skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    #[serde(rename = "Plot", default, with = "fields::optional_text", skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(rename = "Director", default, with = "fields::optional_text", skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(rename = "Actors", default, with = "fields::optional_text", skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(rename = "Runtime", default, with = "fields::optional_text", skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(rename = "Poster", default, with = "fields::optional_text", skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(rename = "Images", default, deserialize_with = "fields::null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(rename = "ComingSoon", default, deserialize_with = "fields::null_as_default", skip_serializing_if = "std::ops::Not::not")]
    pub coming_soon: bool,
    #[serde(rename = "released", alias = "Released", default, with = "fields::optional_text", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl ContentRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content_type,
            ..Self::default()
        }
    }

    pub fn is_movie(&self) -> bool {
        self.content_type == ContentType::Movie
    }

    pub fn is_series(&self) -> bool {
        self.content_type == ContentType::Series
    }

    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }

    /// Individual genre tokens, trimmed, in dataset order
    pub fn genres(&self) -> Vec<&str> {
        self.genre
            .as_deref()
            .map(|text| {
                text.split(',')
                    .map(str::trim)
                    .filter(|g| !g.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Case-insensitive substring match on the raw genre text.
    /// `needle` must already be lowercase.
    pub fn genre_contains(&self, needle: &str) -> bool {
        self.genre
            .as_deref()
            .map(|text| text.to_lowercase().contains(needle))
            .unwrap_or(false)
    }

    pub fn is_award_winner(&self) -> bool {
        match self.awards.as_deref() {
            Some(awards) => {
                !awards.contains(fields::NOT_AVAILABLE) && awards.to_lowercase().contains("won")
            }
            None => false,
        }
    }

    /// `rating × vote_count`; `None` unless both are present
    pub fn trending_score(&self) -> Option<f64> {
        match (self.rating, self.vote_count) {
            (Some(rating), Some(votes)) => Some(rating * votes as f64),
            _ => None,
        }
    }

    /// Leading year digits: "2011–" ⇒ 2011, "1994" ⇒ 1994
    pub fn year_start(&self) -> Option<u32> {
        let year = self.year.as_deref()?;
        let digits: String = year.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }

    /// Release date in either ISO (`2010-07-16`) or OMDb (`16 Jul 2010`) form
    pub fn parsed_release_date(&self) -> Option<NaiveDate> {
        let raw = self.release_date.as_deref()?.trim();
        ["%Y-%m-%d", "%d %b %Y", "%d %B %Y"]
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    }

    /// Text fields searched by free-text queries, lowercased
    pub fn search_haystacks(&self) -> [String; 5] {
        let lower = |field: &Option<String>| field.as_deref().unwrap_or("").to_lowercase();
        [
            self.title.to_lowercase(),
            lower(&self.genre),
            lower(&self.actors),
            lower(&self.director),
            lower(&self.plot),
        ]
    }
}
