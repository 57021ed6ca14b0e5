use catalog_models::ContentRecord;
use clap::ValueEnum;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "✓".green(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "success",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors should always be shown, even in quiet mode
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "✗".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "error",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "info",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "⚠".yellow(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "warning",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    /// Serialize any result for the JSON formats
    pub fn data<T: Serialize>(&self, kind: &str, data: &T) {
        let value = serde_json::to_value(data).unwrap_or(serde_json::Value::Null);
        self.json(&json!({
            "type": kind,
            "data": value
        }));
    }

    /// A titled list of records: a table for humans, an array for JSON
    pub fn records(&self, heading: &str, records: &[&ContentRecord]) {
        match self.format {
            OutputFormat::Human => {
                if self.quiet {
                    return;
                }
                println!("\n{} {}", heading.bright_cyan().bold(), format!("({})", records.len()).dimmed());
                if records.is_empty() {
                    println!("  {}", "Nothing to show".dimmed());
                    return;
                }
                println!("{}", record_table(records));
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.json(&json!({
                    "type": "records",
                    "title": heading,
                    "count": records.len(),
                    "items": records,
                }));
            }
        }
    }

    /// Full detail view of one record
    pub fn record_detail(&self, record: &ContentRecord, in_watchlist: bool) {
        match self.format {
            OutputFormat::Human => {
                if self.quiet {
                    return;
                }
                let mut table = Table::new();
                table.load_preset(comfy_table::presets::UTF8_FULL);
                table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
                table.set_header(vec![
                    Cell::new(&record.title).fg(Color::Cyan).add_attribute(Attribute::Bold),
                    Cell::new(&record.id),
                ]);

                let mut row = |label: &str, value: String| {
                    table.add_row(vec![Cell::new(label), Cell::new(value)]);
                };
                row("Type", record.content_type.to_string());
                row("Year", display_opt(&record.year));
                row("Rating", display_rating(record));
                row("Votes", display_votes(record));
                row("Genre", display_opt(&record.genre));
                row("Runtime", display_opt(&record.runtime));
                row("Director", display_opt(&record.director));
                row("Cast", display_opt(&record.actors));
                row("Released", display_opt(&record.release_date));
                row("Awards", display_opt(&record.awards));
                row("Plot", display_opt(&record.plot));
                if record.coming_soon {
                    row("Status", "Coming soon".to_string());
                }
                row("Watchlist", if in_watchlist { "✓".green().to_string() } else { "—".to_string() });

                println!("{}", table);
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.json(&json!({
                    "type": "detail",
                    "item": record,
                    "in_watchlist": in_watchlist,
                }));
            }
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{}", data);
            }
        }
    }
}

fn record_table(records: &[&ContentRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Type").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Rating").add_attribute(Attribute::Bold),
        Cell::new("Votes").add_attribute(Attribute::Bold),
        Cell::new("Genre").add_attribute(Attribute::Bold),
    ]);

    for record in records {
        let title = if record.coming_soon {
            format!("{} (coming soon)", record.title)
        } else {
            record.title.clone()
        };
        table.add_row(vec![
            Cell::new(&record.id),
            Cell::new(title),
            Cell::new(record.content_type.to_string()),
            Cell::new(display_opt(&record.year)),
            Cell::new(display_rating(record)),
            Cell::new(display_votes(record)),
            Cell::new(display_opt(&record.genre)),
        ]);
    }
    table
}

fn display_opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "—".to_string())
}

fn display_rating(record: &ContentRecord) -> String {
    record
        .rating
        .map(catalog_models::fields::format_rating)
        .unwrap_or_else(|| "unrated".to_string())
}

fn display_votes(record: &ContentRecord) -> String {
    record
        .vote_count
        .map(catalog_models::fields::format_votes)
        .unwrap_or_else(|| "—".to_string())
}
