use super::session::Selection;
use crate::output::{Output, OutputFormat};
use catalog_core::ContentRepository;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use rand::Rng;
use serde_json::json;

const SIMILAR_IN_DETAIL: usize = 6;

pub fn home<R: Rng + ?Sized>(
    repository: &ContentRepository,
    rng: &mut R,
    per_rail: usize,
    output: &Output,
) -> Result<()> {
    let categories = repository.homepage_categories(rng);

    match output.format() {
        OutputFormat::Human => {
            for (title, rail) in categories.rails() {
                let shown = &rail[..rail.len().min(per_rail)];
                output.records(title, shown);
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => output.data("home", &categories),
    }
    Ok(())
}

pub fn search(repository: &ContentRepository, store: &mut Selection, query: &str, output: &Output) -> Result<()> {
    store.set_search_query(query.trim());
    if store.search_query().is_empty() {
        output.warn("Enter a title, person or genre to search for");
        return Ok(());
    }

    let results = repository.search(store.search_query());
    output.records(&format!("Results for \"{}\"", store.search_query()), &results);
    Ok(())
}

pub fn show(repository: &ContentRepository, store: &mut Selection, id: &str, output: &Output) -> Result<()> {
    let record = repository
        .by_id(id)
        .ok_or_else(|| color_eyre::eyre::eyre!("No title with id {} in the catalog", id))?;
    store.open_detail(record.clone());

    if let Some(selected) = store.selected() {
        output.record_detail(selected, store.is_in_watchlist(&selected.id));
    }
    if output.is_human() {
        output.records("More Like This", &repository.similar_content(id, SIMILAR_IN_DETAIL));
    }
    store.close_detail();
    Ok(())
}

pub fn similar(repository: &ContentRepository, id: &str, limit: usize, output: &Output) -> Result<()> {
    let Some(seed) = repository.by_id(id) else {
        output.warn(format!("No title with id {} in the catalog", id));
        return Ok(());
    };
    output.records(&format!("More like {}", seed.title), &repository.similar_content(id, limit));
    Ok(())
}

pub fn rating_range(repository: &ContentRepository, min: f64, max: f64, output: &Output) -> Result<()> {
    if min > max {
        output.warn(format!("Minimum rating {} is above the maximum {}", min, max));
    }
    output.records(
        &format!("Rated {:.1} to {:.1}", min, max),
        &repository.by_rating_range(min, max),
    );
    Ok(())
}

pub fn random<R: Rng + ?Sized>(
    repository: &ContentRepository,
    rng: &mut R,
    count: usize,
    output: &Output,
) -> Result<()> {
    let picks = if count == 1 {
        repository.random_one(rng).into_iter().collect()
    } else {
        repository.random_pick(rng, count)
    };
    output.records("Random Picks", &picks);
    Ok(())
}

pub fn stats(repository: &ContentRepository, output: &Output) -> Result<()> {
    let stats = repository.library_stats();

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("Catalog").fg(Color::Cyan).add_attribute(Attribute::Bold),
                Cell::new("Count").add_attribute(Attribute::Bold),
            ]);
            table.add_row(vec![Cell::new("Titles"), Cell::new(stats.total)]);
            table.add_row(vec![Cell::new("Movies"), Cell::new(stats.movies)]);
            table.add_row(vec![Cell::new("Series"), Cell::new(stats.series)]);
            table.add_row(vec![Cell::new("Coming soon"), Cell::new(stats.coming_soon)]);
            let average = stats
                .average_rating
                .map(|rating| format!("{:.1}", rating))
                .unwrap_or_else(|| "unrated".to_string());
            table.add_row(vec![Cell::new("Average rating"), Cell::new(average)]);
            println!("{}", table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => output.data("stats", &stats),
    }
    Ok(())
}

pub fn facets(repository: &ContentRepository, output: &Output) -> Result<()> {
    let genres = repository.available_genres();
    let years = repository.available_years();

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }
            println!("{}", "Genres".bright_cyan().bold());
            println!("  {}", genres.join(", "));
            println!("{}", "Years".bright_cyan().bold());
            let years: Vec<String> = years.iter().map(|year| year.to_string()).collect();
            println!("  {}", years.join(", "));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => output.json(&json!({
            "type": "facets",
            "genres": genres,
            "years": years,
        })),
    }
    Ok(())
}
