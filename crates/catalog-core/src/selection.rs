//! Browsing state shared by every view: the open detail panel, the search
//! box and the persisted watchlist.

use catalog_config::KeyValueStore;
use catalog_models::ContentRecord;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchlistChange {
    Added,
    Removed,
}

/// Detail selection, search text and watchlist.
///
/// The watchlist is read once from `storage` when the store is opened. Every
/// watchlist mutation writes the whole list back under `key`; a failed write
/// is logged and the in-memory list is kept as is.
#[derive(Debug)]
pub struct SelectionStore<S> {
    storage: S,
    key: String,
    selected: Option<ContentRecord>,
    modal_open: bool,
    search_query: String,
    watchlist: Vec<ContentRecord>,
}

impl<S: KeyValueStore> SelectionStore<S> {
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let watchlist = load_watchlist(&storage, &key);
        info!(key = %key, items = watchlist.len(), "Opened selection store");

        Self {
            storage,
            key,
            selected: None,
            modal_open: false,
            search_query: String::new(),
            watchlist,
        }
    }

    /// Hand the storage back, dropping the transient state
    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn open_detail(&mut self, record: ContentRecord) {
        debug!(id = %record.id, "Opening detail view");
        self.selected = Some(record);
        self.modal_open = true;
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
        self.modal_open = false;
    }

    pub fn selected(&self) -> Option<&ContentRecord> {
        self.selected.as_ref()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    pub fn watchlist(&self) -> &[ContentRecord] {
        &self.watchlist
    }

    pub fn is_in_watchlist(&self, id: &str) -> bool {
        self.watchlist.iter().any(|item| item.id == id)
    }

    /// Remove `record` if an entry with its id exists, otherwise append it
    pub fn toggle_watchlist(&mut self, record: &ContentRecord) -> WatchlistChange {
        let change = if self.is_in_watchlist(&record.id) {
            self.watchlist.retain(|item| item.id != record.id);
            WatchlistChange::Removed
        } else {
            self.watchlist.push(record.clone());
            WatchlistChange::Added
        };
        info!(id = %record.id, title = %record.title, ?change, "Watchlist updated");
        self.persist();
        change
    }

    /// Returns whether an entry was removed
    pub fn remove_from_watchlist(&mut self, id: &str) -> bool {
        let before = self.watchlist.len();
        self.watchlist.retain(|item| item.id != id);
        let removed = self.watchlist.len() != before;
        if removed {
            info!(id = %id, "Removed from watchlist");
        }
        self.persist();
        removed
    }

    pub fn clear_watchlist(&mut self) {
        info!(items = self.watchlist.len(), "Clearing watchlist");
        self.watchlist.clear();
        self.persist();
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.watchlist) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize watchlist: {}", e);
                return;
            }
        };

        match self.storage.set(&self.key, json) {
            Ok(()) => debug!(key = %self.key, items = self.watchlist.len(), "Watchlist saved"),
            Err(e) => warn!("Failed to persist watchlist under {}: {}", self.key, e),
        }
    }
}

/// Read the stored watchlist. A blob that is not an array becomes an empty
/// list; unreadable entries inside an array are dropped one by one.
fn load_watchlist<S: KeyValueStore>(storage: &S, key: &str) -> Vec<ContentRecord> {
    let blob = match storage.get(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            debug!("No stored watchlist under {}", key);
            return Vec::new();
        }
        Err(e) => {
            warn!("Failed to read stored watchlist under {}: {}. Starting empty.", key, e);
            return Vec::new();
        }
    };

    let values = match serde_json::from_str::<Vec<serde_json::Value>>(&blob) {
        Ok(values) => values,
        Err(e) => {
            warn!(
                "Stored watchlist under {} is corrupted: {}. Starting with an empty watchlist.",
                key, e
            );
            return Vec::new();
        }
    };

    // Hand-edited blobs may repeat an id; keep the first
    let mut seen = HashSet::new();
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<ContentRecord>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(index, error = %e, "Dropping unreadable watchlist entry");
                None
            }
        })
        .filter(|item| seen.insert(item.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_config::{LocalStore, MemoryStore, StoreError};
    use catalog_models::ContentType;

    const KEY: &str = "prime-video-watchlist";

    fn create_record(id: &str, title: &str) -> ContentRecord {
        let mut record = ContentRecord::new(id, title, ContentType::Movie);
        record.rating = Some(8.1);
        record.vote_count = Some(12_345);
        record.genre = Some("Drama".to_string());
        record
    }

    /// Store whose writes always fail
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "read-only".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn test_initial_state() {
        let store = SelectionStore::open(MemoryStore::new(), KEY);
        assert!(store.selected().is_none());
        assert!(!store.is_modal_open());
        assert_eq!(store.search_query(), "");
        assert!(store.watchlist().is_empty());
    }

    #[test]
    fn test_detail_open_and_close() {
        let mut store = SelectionStore::open(MemoryStore::new(), KEY);
        store.open_detail(create_record("tt1", "One"));
        assert!(store.is_modal_open());
        assert_eq!(store.selected().map(|r| r.id.as_str()), Some("tt1"));

        store.close_detail();
        assert!(!store.is_modal_open());
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_search_query() {
        let mut store = SelectionStore::open(MemoryStore::new(), KEY);
        store.set_search_query("nolan");
        assert_eq!(store.search_query(), "nolan");
        store.clear_search();
        assert_eq!(store.search_query(), "");
    }

    #[test]
    fn test_toggle_twice_restores_watchlist() {
        let mut store = SelectionStore::open(MemoryStore::new(), KEY);
        let existing = create_record("tt1", "One");
        let toggled = create_record("tt2", "Two");
        store.toggle_watchlist(&existing);

        let before: Vec<String> = store.watchlist().iter().map(|r| r.id.clone()).collect();
        assert_eq!(store.toggle_watchlist(&toggled), WatchlistChange::Added);
        assert!(store.is_in_watchlist("tt2"));
        assert_eq!(store.toggle_watchlist(&toggled), WatchlistChange::Removed);
        assert!(!store.is_in_watchlist("tt2"));

        let after: Vec<String> = store.watchlist().iter().map(|r| r.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_toggle_matches_by_id_only() {
        let mut store = SelectionStore::open(MemoryStore::new(), KEY);
        store.toggle_watchlist(&create_record("tt1", "Original title"));
        let change = store.toggle_watchlist(&create_record("tt1", "Edited title"));
        assert_eq!(change, WatchlistChange::Removed);
        assert!(store.watchlist().is_empty());
    }

    #[test]
    fn test_persistence_round_trip() {
        let movie = create_record("tt1375666", "Inception");
        let mut store = SelectionStore::open(MemoryStore::new(), KEY);
        store.toggle_watchlist(&movie);

        let reopened = SelectionStore::open(store.into_storage(), KEY);
        assert_eq!(reopened.watchlist(), &[movie][..]);
    }

    #[test]
    fn test_blob_is_full_record_array() {
        let mut store = SelectionStore::open(MemoryStore::new(), KEY);
        store.toggle_watchlist(&create_record("tt1", "One"));

        let storage = store.into_storage();
        let blob = storage.get(KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value[0]["imdbID"], "tt1");
        assert_eq!(value[0]["Title"], "One");
        assert_eq!(value[0]["imdbVotes"], "12,345");
    }

    #[test]
    fn test_remove_and_clear_persist() {
        let mut store = SelectionStore::open(MemoryStore::new(), KEY);
        store.toggle_watchlist(&create_record("tt1", "One"));
        store.toggle_watchlist(&create_record("tt2", "Two"));
        store.toggle_watchlist(&create_record("tt3", "Three"));

        assert!(store.remove_from_watchlist("tt2"));
        assert!(!store.remove_from_watchlist("tt2"));
        let reopened = SelectionStore::open(store.into_storage(), KEY);
        let ids: Vec<&str> = reopened.watchlist().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt3"]);

        let mut store = reopened;
        store.clear_watchlist();
        let reopened = SelectionStore::open(store.into_storage(), KEY);
        assert!(reopened.watchlist().is_empty());
    }

    #[test]
    fn test_corrupted_blob_opens_empty() {
        let mut storage = MemoryStore::new();
        storage.set(KEY, "{not valid json".to_string()).unwrap();
        let store = SelectionStore::open(storage, KEY);
        assert!(store.watchlist().is_empty());

        let mut storage = MemoryStore::new();
        storage.set(KEY, r#"{"imdbID": "tt1"}"#.to_string()).unwrap();
        let store = SelectionStore::open(storage, KEY);
        assert!(store.watchlist().is_empty());
    }

    #[test]
    fn test_odd_entries_in_blob_keep_the_good_ones() {
        let mut storage = MemoryStore::new();
        storage
            .set(
                KEY,
                r#"[
                    {"imdbID": "tt1", "Title": "Fine", "Type": "movie", "imdbRating": "8.0"},
                    {"imdbID": "tt2", "Title": null, "Type": null, "ComingSoon": null, "Images": null},
                    {"imdbID": "tt3", "Title": "Numbers", "Year": 1999, "imdbRating": 7.5, "imdbVotes": 1200},
                    {"imdbID": "tt4", "Title": ["not", "text"]},
                    42
                ]"#
                .to_string(),
            )
            .unwrap();

        let store = SelectionStore::open(storage, KEY);
        let ids: Vec<&str> = store.watchlist().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt2", "tt3"]);
        assert_eq!(store.watchlist()[2].year.as_deref(), Some("1999"));
    }

    #[test]
    fn test_duplicate_ids_in_blob_are_collapsed() {
        let mut storage = MemoryStore::new();
        storage
            .set(KEY, r#"[{"imdbID": "tt1", "Title": "A"}, {"imdbID": "tt1", "Title": "B"}]"#.to_string())
            .unwrap();
        let store = SelectionStore::open(storage, KEY);
        assert_eq!(store.watchlist().len(), 1);
        assert_eq!(store.watchlist()[0].title, "A");
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let mut store = SelectionStore::open(ReadOnlyStore { inner: MemoryStore::new() }, KEY);
        assert_eq!(store.toggle_watchlist(&create_record("tt1", "One")), WatchlistChange::Added);
        assert!(store.is_in_watchlist("tt1"));

        let storage = store.into_storage();
        assert_eq!(storage.get(KEY).unwrap(), None);
    }

    #[test]
    fn test_local_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.toml");

        let mut store = SelectionStore::open(LocalStore::open(path.clone()).unwrap(), KEY);
        store.toggle_watchlist(&create_record("tt1", "One"));
        drop(store);

        let reopened = SelectionStore::open(LocalStore::open(path).unwrap(), KEY);
        assert!(reopened.is_in_watchlist("tt1"));
    }
}
