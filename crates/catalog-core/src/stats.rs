use serde::Serialize;

use crate::repository::ContentRepository;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryStats {
    pub total: usize,
    /// Released movies only
    pub movies: usize,
    pub series: usize,
    pub coming_soon: usize,
    /// Mean of all known ratings, one decimal. `None` when nothing is rated.
    pub average_rating: Option<f64>,
}

impl ContentRepository {
    pub fn library_stats(&self) -> LibraryStats {
        let ratings: Vec<f64> = self.records.iter().filter_map(|record| record.rating).collect();
        let average_rating = if ratings.is_empty() {
            None
        } else {
            let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
            Some((mean * 10.0).round() / 10.0)
        };

        LibraryStats {
            total: self.records.len(),
            movies: self.movies().len(),
            series: self.series().len(),
            coming_soon: self.coming_soon().len(),
            average_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_models::{ContentRecord, ContentType};

    fn record(id: &str, content_type: ContentType, rating: Option<f64>) -> ContentRecord {
        let mut record = ContentRecord::new(id, id, content_type);
        record.rating = rating;
        record
    }

    #[test]
    fn test_library_stats() {
        let mut upcoming = record("upcoming", ContentType::Movie, None);
        upcoming.coming_soon = true;

        let repo = ContentRepository::build(vec![vec![
            record("a", ContentType::Movie, Some(8.0)),
            record("b", ContentType::Movie, Some(7.5)),
            record("c", ContentType::Series, Some(9.0)),
            record("d", ContentType::Unknown, None),
            upcoming,
        ]]);

        let stats = repo.library_stats();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.movies, 2);
        assert_eq!(stats.series, 1);
        assert_eq!(stats.coming_soon, 1);
        // (8.0 + 7.5 + 9.0) / 3 = 8.1666…
        assert_eq!(stats.average_rating, Some(8.2));
    }

    #[test]
    fn test_library_stats_without_ratings() {
        let repo = ContentRepository::build(vec![vec![
            record("a", ContentType::Movie, None),
            record("b", ContentType::Series, None),
        ]]);
        let stats = repo.library_stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.average_rating, None);
    }

    #[test]
    fn test_library_stats_empty_catalog() {
        let stats = ContentRepository::default().library_stats();
        assert_eq!(
            stats,
            LibraryStats {
                total: 0,
                movies: 0,
                series: 0,
                coming_soon: 0,
                average_rating: None,
            }
        );
    }
}
