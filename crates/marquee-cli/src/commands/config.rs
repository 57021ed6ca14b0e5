use super::prompts;
use crate::output::{Output, OutputFormat};
use catalog_config::{Config, PathManager};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

pub fn show_config(
    config: &Config,
    config_path: &Path,
    source_base: &Path,
    paths: &PathManager,
    output: &Output,
) -> Result<()> {
    let store_file = config
        .watchlist
        .store_file
        .clone()
        .unwrap_or_else(|| paths.store_file());

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            if !config_path.exists() {
                output.warn(format!(
                    "Configuration file not found at: {}. Showing defaults.",
                    config_path.display()
                ));
                output.info("Run 'marquee config init' to write one.");
            }

            println!("\n{}", "Configuration".bright_cyan().bold());

            let mut info_table = Table::new();
            info_table.set_header(vec![
                Cell::new("Config File").add_attribute(comfy_table::Attribute::Bold),
                Cell::new(config_path.display().to_string()),
            ]);
            info_table.add_row(vec![Cell::new("Watchlist Store"), Cell::new(store_file.display().to_string())]);
            info_table.add_row(vec![Cell::new("Data Directory"), Cell::new(paths.data_dir().display().to_string())]);
            info_table.add_row(vec![Cell::new("Log Directory"), Cell::new(paths.log_dir().display().to_string())]);
            info_table.load_preset(comfy_table::presets::UTF8_FULL);
            info_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", info_table);
            println!();

            let mut catalog_table = Table::new();
            catalog_table.set_header(vec![
                Cell::new("Catalog Sources").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Found"),
            ]);
            for (source, resolved) in config.catalog.sources.iter().zip(config.resolved_sources(source_base)) {
                let found = if resolved.exists() {
                    "✓".green().to_string()
                } else {
                    "✗".red().to_string()
                };
                catalog_table.add_row(vec![Cell::new(source.display().to_string()), Cell::new(found)]);
            }
            catalog_table.load_preset(comfy_table::presets::UTF8_FULL);
            catalog_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", catalog_table);
            println!();

            let mut settings_table = Table::new();
            settings_table.set_header(vec![
                Cell::new("Settings").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
            ]);
            settings_table.add_row(vec![Cell::new("Watchlist key"), Cell::new(&config.watchlist.storage_key)]);
            settings_table.add_row(vec![Cell::new("Log level"), Cell::new(&config.logging.level)]);
            let log_file = config
                .logging
                .file
                .as_ref()
                .map(|file| file.display().to_string())
                .unwrap_or_else(|| "stderr".to_string());
            settings_table.add_row(vec![Cell::new("Log output"), Cell::new(log_file)]);
            settings_table.load_preset(comfy_table::presets::UTF8_FULL);
            settings_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", settings_table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "type": "config",
                "config_file": config_path.display().to_string(),
                "config_file_exists": config_path.exists(),
                "store_file": store_file.display().to_string(),
                "config": serde_json::to_value(config)?,
            }));
        }
    }

    Ok(())
}

pub fn init_config(config_path: &Path, paths: &PathManager, force: bool, output: &Output) -> Result<()> {
    if config_path.exists() && !force {
        let prompt = format!("{} already exists. Overwrite it with defaults?", config_path.display());
        if !prompts::prompt_yes_no_with_output(&prompt, Some(false), Some(output))? {
            output.info("Configuration left unchanged");
            return Ok(());
        }
    }

    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create marquee directories: {}", e))?;
    Config::default()
        .save_to_file(config_path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write config to {}: {}", config_path.display(), e))?;
    output.success(format!("Wrote default configuration to {}", config_path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_config_writes_defaults_and_layout() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().join("marquee"));
        let output = Output::new(OutputFormat::Json, true);

        init_config(&paths.config_file(), &paths, false, &output).unwrap();

        assert!(paths.data_dir().is_dir());
        assert!(paths.log_dir().is_dir());
        let written = Config::load_from_file(&paths.config_file()).unwrap();
        written.validate().unwrap();
        assert_eq!(written.watchlist.storage_key, catalog_config::DEFAULT_WATCHLIST_KEY);
    }
}
