use catalog_models::{ContentRecord, ContentType};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::repository::ContentRepository;

/// Browse criteria. Every field is optional and present fields are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentFilter {
    pub content_type: Option<ContentType>,
    /// Case-insensitive substring of the genre text
    pub genre: Option<String>,
    /// Minimum rating; unrated records never pass, so `Some(0.0)` still
    /// drops every record without a rating
    pub min_rating: Option<f64>,
    /// Substring of the year text
    pub year: Option<String>,
    /// Exact match on the coming-soon flag
    pub coming_soon: Option<bool>,
}

impl ContentFilter {
    pub fn matches(&self, record: &ContentRecord) -> bool {
        if let Some(content_type) = self.content_type {
            if record.content_type != content_type {
                return false;
            }
        }

        if let Some(genre) = non_blank(&self.genre) {
            if !record.genre_contains(&genre.to_lowercase()) {
                return false;
            }
        }

        if let Some(min_rating) = self.min_rating {
            match record.rating {
                Some(rating) if rating >= min_rating => {}
                _ => return false,
            }
        }

        if let Some(year) = non_blank(&self.year) {
            let in_year = record
                .year
                .as_deref()
                .map(|text| text.contains(year))
                .unwrap_or(false);
            if !in_year {
                return false;
            }
        }

        if let Some(coming_soon) = self.coming_soon {
            if record.coming_soon != coming_soon {
                return false;
            }
        }

        true
    }
}

/// Blank text criteria are treated as absent
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Browse page sort orders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Highest rating first, unrated last
    #[default]
    Rating,
    /// Most votes first
    Votes,
    /// Newest first, by the starting year
    Year,
    /// A to Z, ignoring case
    Title,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortBy::Rating => "rating",
            SortBy::Votes => "votes",
            SortBy::Year => "year",
            SortBy::Title => "title",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rating" => Ok(SortBy::Rating),
            "votes" => Ok(SortBy::Votes),
            "year" => Ok(SortBy::Year),
            "title" => Ok(SortBy::Title),
            other => Err(format!(
                "Invalid sort order: {}. Use 'rating', 'votes', 'year', or 'title'",
                other
            )),
        }
    }
}

impl SortBy {
    pub fn compare(&self, a: &ContentRecord, b: &ContentRecord) -> Ordering {
        match self {
            SortBy::Rating => b.rating.unwrap_or(0.0).total_cmp(&a.rating.unwrap_or(0.0)),
            SortBy::Votes => b.vote_count.unwrap_or(0).cmp(&a.vote_count.unwrap_or(0)),
            SortBy::Year => b.year_start().unwrap_or(0).cmp(&a.year_start().unwrap_or(0)),
            SortBy::Title => collate_titles(&a.title, &b.title),
        }
    }
}

/// Title order for humans: letters first, then accents, then case with
/// lowercase ahead of uppercase, then raw code points.
fn collate_titles(a: &str, b: &str) -> Ordering {
    let lower_a = a.to_lowercase();
    let lower_b = b.to_lowercase();
    base_letters(&lower_a)
        .cmp(base_letters(&lower_b))
        .then_with(|| lower_a.cmp(&lower_b))
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}

fn base_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd().filter(|c| !is_combining_mark(*c))
}

/// Stable in-place sort of a result list
pub fn sort_records(records: &mut [&ContentRecord], sort_by: SortBy) {
    records.sort_by(|a, b| sort_by.compare(a, b));
}

impl ContentRepository {
    /// Apply every present criterion in `filter`, keeping catalog order
    pub fn filter_content(&self, filter: &ContentFilter) -> Vec<&ContentRecord> {
        let results: Vec<&ContentRecord> = self
            .records
            .iter()
            .filter(|record| filter.matches(record))
            .collect();
        debug!(?filter, matches = results.len(), "Filtered catalog");
        results
    }

    /// Browse page results: filter, then sort
    pub fn browse(&self, filter: &ContentFilter, sort_by: SortBy) -> Vec<&ContentRecord> {
        let mut results = self.filter_content(filter);
        sort_records(&mut results, sort_by);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, genre: &str, rating: Option<f64>) -> ContentRecord {
        let mut record = ContentRecord::new(id, id, ContentType::Movie);
        record.genre = Some(genre.to_string());
        record.rating = rating;
        record
    }

    fn sample_catalog() -> ContentRepository {
        let mut drama_series = ContentRecord::new("series-drama", "Series Drama", ContentType::Series);
        drama_series.genre = Some("Drama".to_string());
        drama_series.rating = Some(9.0);

        let mut upcoming = movie("upcoming-drama", "Drama", None);
        upcoming.coming_soon = true;

        ContentRepository::build(vec![vec![
            movie("great-drama", "Crime, Drama", Some(9.3)),
            movie("good-drama", "drama", Some(8.0)),
            movie("weak-drama", "Drama", Some(7.9)),
            movie("unrated-drama", "Drama", None),
            movie("great-action", "Action", Some(9.0)),
            drama_series,
            upcoming,
        ]])
    }

    fn ids<'a>(records: &[&'a ContentRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_filter_content_combines_criteria() {
        let repo = sample_catalog();
        let filter = ContentFilter {
            content_type: Some(ContentType::Movie),
            genre: Some("Drama".to_string()),
            min_rating: Some(8.0),
            ..ContentFilter::default()
        };

        let results = repo.filter_content(&filter);
        assert_eq!(ids(&results), vec!["great-drama", "good-drama"]);
        for record in results {
            assert!(record.is_movie());
            assert!(record.genre_contains("drama"));
            assert!(record.rating.unwrap() >= 8.0);
        }
    }

    #[test]
    fn test_zero_min_rating_still_drops_unrated() {
        let repo = sample_catalog();
        let filter = ContentFilter {
            min_rating: Some(0.0),
            ..ContentFilter::default()
        };

        let results = repo.filter_content(&filter);
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.rating.is_some()));
        assert!(!ids(&results).contains(&"unrated-drama"));
    }

    #[test]
    fn test_empty_filter_is_noop() {
        let repo = sample_catalog();
        assert_eq!(repo.filter_content(&ContentFilter::default()).len(), repo.len());

        let blank = ContentFilter {
            genre: Some("  ".to_string()),
            year: Some(String::new()),
            ..ContentFilter::default()
        };
        assert_eq!(repo.filter_content(&blank).len(), repo.len());
    }

    #[test]
    fn test_coming_soon_criterion() {
        let repo = sample_catalog();
        let only_upcoming = ContentFilter {
            coming_soon: Some(true),
            ..ContentFilter::default()
        };
        assert_eq!(ids(&repo.filter_content(&only_upcoming)), vec!["upcoming-drama"]);

        let released = ContentFilter {
            coming_soon: Some(false),
            ..ContentFilter::default()
        };
        assert_eq!(repo.filter_content(&released).len(), repo.len() - 1);
    }

    #[test]
    fn test_year_criterion() {
        let mut a = movie("a", "Drama", Some(8.0));
        a.year = Some("2011–2019".to_string());
        let mut b = movie("b", "Drama", Some(8.0));
        b.year = Some("2012".to_string());
        let repo = ContentRepository::build(vec![vec![a, b]]);

        let filter = ContentFilter {
            year: Some("2011".to_string()),
            ..ContentFilter::default()
        };
        assert_eq!(ids(&repo.filter_content(&filter)), vec!["a"]);
    }

    #[test]
    fn test_browse_sort_by_rating_puts_unrated_last() {
        let repo = sample_catalog();
        let filter = ContentFilter {
            content_type: Some(ContentType::Movie),
            coming_soon: Some(false),
            ..ContentFilter::default()
        };
        let results = repo.browse(&filter, SortBy::Rating);
        assert_eq!(
            ids(&results),
            vec!["great-drama", "great-action", "good-drama", "weak-drama", "unrated-drama"]
        );
    }

    #[test]
    fn test_browse_sort_by_title_ignores_case() {
        let repo = ContentRepository::build(vec![vec![
            ContentRecord::new("1", "beta", ContentType::Movie),
            ContentRecord::new("2", "Alpha", ContentType::Movie),
            ContentRecord::new("3", "", ContentType::Movie),
            ContentRecord::new("4", "alpha", ContentType::Movie),
        ]]);
        let results = repo.browse(&ContentFilter::default(), SortBy::Title);
        assert_eq!(ids(&results), vec!["3", "4", "2", "1"]);
    }

    #[test]
    fn test_browse_sort_by_title_folds_accents() {
        let repo = ContentRepository::build(vec![vec![
            ContentRecord::new("z", "Zodiac", ContentType::Movie),
            ContentRecord::new("e", "Élite", ContentType::Series),
            ContentRecord::new("a2", "Amélie", ContentType::Movie),
            ContentRecord::new("a1", "Amelie", ContentType::Movie),
            ContentRecord::new("b", "Éclair", ContentType::Movie),
        ]]);
        let results = repo.browse(&ContentFilter::default(), SortBy::Title);
        assert_eq!(ids(&results), vec!["a1", "a2", "b", "e", "z"]);
    }

    #[test]
    fn test_browse_sort_by_year_and_votes() {
        let mut old = ContentRecord::new("old", "Old", ContentType::Series);
        old.year = Some("1999–2003".to_string());
        old.vote_count = Some(5_000);
        let mut new = ContentRecord::new("new", "New", ContentType::Movie);
        new.year = Some("2020".to_string());
        new.vote_count = Some(100);
        let undated = ContentRecord::new("undated", "Undated", ContentType::Movie);
        let repo = ContentRepository::build(vec![vec![undated, old, new]]);

        let by_year = repo.browse(&ContentFilter::default(), SortBy::Year);
        assert_eq!(ids(&by_year), vec!["new", "old", "undated"]);

        let by_votes = repo.browse(&ContentFilter::default(), SortBy::Votes);
        assert_eq!(ids(&by_votes), vec!["old", "new", "undated"]);
    }

    #[test]
    fn test_sort_by_parse() {
        assert_eq!("Votes".parse::<SortBy>(), Ok(SortBy::Votes));
        assert!("popularity".parse::<SortBy>().is_err());
        assert_eq!(SortBy::Title.to_string(), "title");
    }
}
