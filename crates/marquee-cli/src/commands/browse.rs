use crate::output::Output;
use catalog_core::{ContentFilter, ContentRepository, SortBy};
use color_eyre::Result;

pub fn run_browse(
    repository: &ContentRepository,
    filter: &ContentFilter,
    sort_by: SortBy,
    limit: Option<usize>,
    output: &Output,
) -> Result<()> {
    let mut results = repository.browse(filter, sort_by);
    let total = results.len();
    if let Some(limit) = limit {
        results.truncate(limit);
    }

    let mut heading = match filter.content_type {
        Some(content_type) => format!("Browse {} by {}", content_type, sort_by),
        None => format!("Browse all by {}", sort_by),
    };
    if results.len() < total {
        heading.push_str(&format!(", first {} of {}", results.len(), total));
    }

    output.records(&heading, &results);
    Ok(())
}
