pub mod browse;
pub mod categories;
pub mod query;
pub mod repository;
pub mod selection;
pub mod stats;

pub use browse::{sort_records, ContentFilter, SortBy};
pub use categories::HomepageCategories;
pub use query::MAX_RATING;
pub use repository::ContentRepository;
pub use selection::{SelectionStore, WatchlistChange};
pub use stats::LibraryStats;
