use super::prompts;
use super::session::Selection;
use crate::output::Output;
use catalog_core::{ContentRepository, WatchlistChange};
use color_eyre::Result;
use serde_json::json;

pub fn list(store: &Selection, output: &Output) -> Result<()> {
    let entries: Vec<_> = store.watchlist().iter().collect();
    output.records("My Watchlist", &entries);
    Ok(())
}

/// Toggle by id. The record is looked up in the catalog so the stored entry
/// carries every field.
pub fn toggle(repository: &ContentRepository, store: &mut Selection, id: &str, output: &Output) -> Result<()> {
    let record = match repository.by_id(id) {
        Some(record) => record.clone(),
        None => {
            // Entries whose title left the catalog can still be removed
            if store.remove_from_watchlist(id) {
                output.success(format!("Removed {} from the watchlist", id));
                return Ok(());
            }
            return Err(color_eyre::eyre::eyre!("No title with id {} in the catalog", id));
        }
    };

    let change = store.toggle_watchlist(&record);
    if output.is_human() {
        match change {
            WatchlistChange::Added => output.success(format!("Added {} to the watchlist", record.title)),
            WatchlistChange::Removed => output.success(format!("Removed {} from the watchlist", record.title)),
        }
    } else {
        output.json(&json!({
            "type": "watchlist",
            "change": change,
            "id": record.id,
            "count": store.watchlist().len(),
        }));
    }
    Ok(())
}

pub fn remove(store: &mut Selection, id: &str, output: &Output) -> Result<()> {
    if store.remove_from_watchlist(id) {
        output.success(format!("Removed {} from the watchlist", id));
    } else {
        output.warn(format!("{} is not on the watchlist", id));
    }
    Ok(())
}

pub fn clear(store: &mut Selection, yes: bool, output: &Output) -> Result<()> {
    let count = store.watchlist().len();
    if count == 0 {
        output.info("The watchlist is already empty");
        return Ok(());
    }

    if !yes {
        let prompt = format!("Remove all {} titles from the watchlist?", count);
        if !prompts::prompt_yes_no_with_output(&prompt, Some(false), Some(output))? {
            output.info("Watchlist left unchanged");
            return Ok(());
        }
    }

    store.clear_watchlist();
    output.success(format!("Cleared {} titles from the watchlist", count));
    Ok(())
}
