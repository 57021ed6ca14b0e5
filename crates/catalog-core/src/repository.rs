use catalog_models::ContentRecord;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

/// Deduplicated, read-only catalog.
///
/// Built once at startup from every configured source. Query methods live in
/// `query`, `browse`, `categories` and `stats`.
#[derive(Debug, Clone, Default)]
pub struct ContentRepository {
    pub(crate) records: Vec<ContentRecord>,
}

impl ContentRepository {
    /// Concatenate `sources` in order and keep the first record seen for each id
    pub fn build<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = Vec<ContentRecord>>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut records = Vec::new();
        let mut total = 0usize;
        let mut source_count = 0usize;

        for source in sources {
            source_count += 1;
            for record in source {
                total += 1;
                if seen.insert(record.id.clone()) {
                    records.push(record);
                } else {
                    debug!(id = %record.id, title = %record.title, "Dropping duplicate catalog record");
                }
            }
        }

        info!(
            "Built catalog: {} unique records from {} input records across {} sources",
            records.len(),
            total,
            source_count
        );

        Self { records }
    }

    pub fn all(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&ContentRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Distinct genre tokens, sorted
    pub fn available_genres(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(|record| record.genres())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct starting years, newest first
    pub fn available_years(&self) -> Vec<u32> {
        self.records
            .iter()
            .filter_map(ContentRecord::year_start)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .rev()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_models::ContentType;

    fn record(id: &str, title: &str) -> ContentRecord {
        ContentRecord::new(id, title, ContentType::Movie)
    }

    #[test]
    fn test_build_keeps_first_occurrence() {
        let repo = ContentRepository::build(vec![
            vec![record("tt1", "First A"), record("tt2", "First B")],
            vec![record("tt2", "Second B"), record("tt3", "Second C")],
            vec![record("tt1", "Third A")],
        ]);

        let titles: Vec<&str> = repo.all().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First A", "First B", "Second C"]);
    }

    #[test]
    fn test_build_dedupes_within_one_source() {
        let repo = ContentRepository::build(vec![vec![
            record("tt1", "A"),
            record("tt1", "A again"),
            record("tt1", "A once more"),
        ]]);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.all()[0].title, "A");
    }

    #[test]
    fn test_build_empty() {
        let repo = ContentRepository::build(Vec::<Vec<ContentRecord>>::new());
        assert!(repo.is_empty());
        assert!(repo.by_id("tt1").is_none());
    }

    #[test]
    fn test_by_id() {
        let repo = ContentRepository::build(vec![vec![record("tt1", "A"), record("tt2", "B")]]);
        assert_eq!(repo.by_id("tt2").map(|r| r.title.as_str()), Some("B"));
        assert!(repo.by_id("tt9").is_none());
    }

    #[test]
    fn test_available_facets() {
        let mut a = record("tt1", "A");
        a.genre = Some("Drama, Crime".to_string());
        a.year = Some("1994".to_string());
        let mut b = record("tt2", "B");
        b.genre = Some("Action, Drama".to_string());
        b.year = Some("2011–".to_string());
        let c = record("tt3", "No metadata");

        let repo = ContentRepository::build(vec![vec![a, b, c]]);
        assert_eq!(repo.available_genres(), vec!["Action", "Crime", "Drama"]);
        assert_eq!(repo.available_years(), vec![2011, 1994]);
    }
}
