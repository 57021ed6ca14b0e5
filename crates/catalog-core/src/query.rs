//! Read-only queries over the catalog.
//!
//! Every query is a linear scan returning borrowed records in catalog order,
//! unless the query itself defines a ranking.

use catalog_models::{ContentRecord, ContentType};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::repository::ContentRepository;

/// Upper bound of the rating scale
pub const MAX_RATING: f64 = 10.0;

impl ContentRepository {
    pub fn by_type(&self, content_type: ContentType) -> Vec<&ContentRecord> {
        self.records
            .iter()
            .filter(|record| record.content_type == content_type)
            .collect()
    }

    /// Released movies; coming-soon titles are left out
    pub fn movies(&self) -> Vec<&ContentRecord> {
        self.records
            .iter()
            .filter(|record| record.is_movie() && !record.coming_soon)
            .collect()
    }

    pub fn series(&self) -> Vec<&ContentRecord> {
        self.by_type(ContentType::Series)
    }

    pub fn coming_soon(&self) -> Vec<&ContentRecord> {
        self.records.iter().filter(|record| record.coming_soon).collect()
    }

    /// Case-insensitive substring match on the raw genre text
    pub fn by_genre(&self, genre: &str) -> Vec<&ContentRecord> {
        let needle = genre.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.genre_contains(&needle))
            .collect()
    }

    /// Records whose genre text contains any of `genres`
    pub fn by_any_genre(&self, genres: &[&str]) -> Vec<&ContentRecord> {
        let needles: Vec<String> = genres.iter().map(|g| g.to_lowercase()).collect();
        self.records
            .iter()
            .filter(|record| needles.iter().any(|needle| record.genre_contains(needle)))
            .collect()
    }

    pub fn top_rated(&self, limit: usize) -> Vec<&ContentRecord> {
        let mut rated: Vec<(f64, &ContentRecord)> = self
            .records
            .iter()
            .filter_map(|record| record.rating.map(|rating| (rating, record)))
            .collect();
        rated.sort_by(|a, b| b.0.total_cmp(&a.0));
        rated.into_iter().take(limit).map(|(_, record)| record).collect()
    }

    pub fn award_winners(&self) -> Vec<&ContentRecord> {
        self.records
            .iter()
            .filter(|record| record.is_award_winner())
            .collect()
    }

    /// Substring match on the year text, so "2011" also finds "2011–2019"
    pub fn by_year(&self, year: &str) -> Vec<&ContentRecord> {
        self.records
            .iter()
            .filter(|record| {
                record
                    .year
                    .as_deref()
                    .map(|text| text.contains(year))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Newest releases first. Records without a release date are skipped;
    /// dates that fail to parse rank after every real date.
    pub fn recent_content(&self, limit: usize) -> Vec<&ContentRecord> {
        let mut dated: Vec<(NaiveDate, &ContentRecord)> = self
            .records
            .iter()
            .filter(|record| record.release_date.is_some())
            .map(|record| (record.parsed_release_date().unwrap_or(NaiveDate::MIN), record))
            .collect();
        dated.sort_by(|a, b| b.0.cmp(&a.0));
        dated.into_iter().take(limit).map(|(_, record)| record).collect()
    }

    /// Free-text search over title, genre, actors, director and plot.
    /// Blank queries match nothing.
    pub fn search(&self, query: &str) -> Vec<&ContentRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let results: Vec<&ContentRecord> = self
            .records
            .iter()
            .filter(|record| {
                record
                    .search_haystacks()
                    .iter()
                    .any(|haystack| haystack.contains(&needle))
            })
            .collect();
        debug!(query = %needle, matches = results.len(), "Search");
        results
    }

    /// Inclusive rating range; unrated records never match
    pub fn by_rating_range(&self, min: f64, max: f64) -> Vec<&ContentRecord> {
        self.records
            .iter()
            .filter(|record| {
                record
                    .rating
                    .map(|rating| rating >= min && rating <= max)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Ranked by `rating × vote_count`
    pub fn trending(&self, limit: usize) -> Vec<&ContentRecord> {
        let mut scored: Vec<(f64, &ContentRecord)> = self
            .records
            .iter()
            .filter_map(|record| record.trending_score().map(|score| (score, record)))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().take(limit).map(|(_, record)| record).collect()
    }

    /// Up to `count` distinct records, drawn uniformly and returned in random order
    pub fn random_pick<R>(&self, rng: &mut R, count: usize) -> Vec<&ContentRecord>
    where
        R: Rng + ?Sized,
    {
        let mut pool: Vec<&ContentRecord> = self.records.iter().collect();
        let (picked, _) = pool.partial_shuffle(rng, count);
        picked.to_vec()
    }

    pub fn random_one<R>(&self, rng: &mut R) -> Option<&ContentRecord>
    where
        R: Rng + ?Sized,
    {
        self.records.choose(rng)
    }

    /// Same-type records sharing at least one genre with `id`, in catalog order.
    /// The seed itself is never included.
    pub fn similar_content(&self, id: &str, limit: usize) -> Vec<&ContentRecord> {
        let Some(seed) = self.by_id(id) else {
            return Vec::new();
        };

        let tokens: Vec<String> = seed.genres().iter().map(|g| g.to_lowercase()).collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        self.records
            .iter()
            .filter(|record| {
                record.id != seed.id
                    && record.content_type == seed.content_type
                    && tokens.iter().any(|token| record.genre_contains(token))
            })
            .take(limit)
            .collect()
    }
}
