use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Context;
use commands::{browse, catalog, config, session, watchlist};
use catalog_config::{Config, PathManager};
use catalog_core::{ContentFilter, SortBy};
use catalog_models::ContentType;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Marquee - Browse a movie and series catalog from the terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Config file (defaults to config.toml in the marquee config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Catalog dataset to load instead of the configured sources (repeatable)
    #[arg(long = "source", global = true, value_name = "FILE")]
    sources: Vec<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TypeArg {
    Movie,
    Series,
}

impl From<TypeArg> for ContentType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Movie => ContentType::Movie,
            TypeArg::Series => ContentType::Series,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Rating,
    Votes,
    Year,
    Title,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Rating => SortBy::Rating,
            SortArg::Votes => SortBy::Votes,
            SortArg::Year => SortBy::Year,
            SortArg::Title => SortBy::Title,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the home screen rails
    #[command(long_about = "Show every home screen rail: featured picks, continue watching, top rated, trending, popular movies, TV shows, genre rails, coming soon and award winners.")]
    Home {
        /// Seed for the featured picks (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Records shown per rail in human output
        #[arg(long, default_value_t = 6)]
        per_rail: usize,
    },
    /// Filter and sort the catalog
    Browse {
        /// Only movies or only series
        #[arg(long = "type", value_enum)]
        content_type: Option<TypeArg>,

        /// Genre text to match (case-insensitive substring)
        #[arg(long)]
        genre: Option<String>,

        /// Minimum rating (0-10)
        #[arg(long)]
        min_rating: Option<f64>,

        /// Year text to match
        #[arg(long)]
        year: Option<String>,

        /// Sort order
        #[arg(long, value_enum, default_value = "rating")]
        sort: SortArg,

        /// Include titles that are not released yet
        #[arg(long, action = ArgAction::SetTrue)]
        include_coming_soon: bool,

        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Search titles, plots, cast, directors and genres
    Search {
        /// Search text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show the detail view for one title
    Show {
        /// IMDb id, e.g. tt1375666
        id: String,
    },
    /// Titles similar to a given one
    Similar {
        id: String,

        #[arg(long, default_value_t = 6)]
        limit: usize,
    },
    /// Highest rated titles
    Top {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Titles ranked by rating weighted with vote count
    Trending {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Most recently released titles
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Titles announced but not released yet
    ComingSoon,
    /// Titles that won at least one award
    Awards,
    /// Titles whose year text contains the given year
    Year { year: String },
    /// Titles rated inside an inclusive range
    RatingRange {
        min: f64,

        #[arg(default_value_t = catalog_core::MAX_RATING)]
        max: f64,
    },
    /// Titles in a genre
    Genre { genre: String },
    /// Random titles
    Random {
        #[arg(long, default_value_t = 1)]
        count: usize,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// Catalog counts and average rating
    Stats,
    /// Genres and years present in the catalog
    Facets,
    /// Manage the persisted watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// List watchlist entries
    List,
    /// Add a title, or remove it when already present
    Toggle { id: String },
    /// Remove a title by id
    Remove { id: String },
    /// Remove every entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y', action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration and paths
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file without asking
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file());
    let mut config = if cli.config.is_some() {
        // An explicit config must exist
        Config::load_from_file(&config_path)
    } else {
        Config::load_or_default(&config_path)
    }
    .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_path.display(), e))?;

    let source_base = if !cli.sources.is_empty() {
        config.catalog.sources = cli.sources.clone();
        std::env::current_dir().wrap_err("Failed to read the working directory")?
    } else {
        session::config_base(&config_path)
    };

    logging::init_logging(
        cli.verbose,
        cli.quiet,
        &config.logging.level,
        config.logging.file.as_deref(),
    )
    .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let load_catalog = || session::load_catalog(&config, &source_base);

    match cli.command {
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show => config::show_config(&config, &config_path, &source_base, &paths, &output),
            ConfigCommands::Init { force } => config::init_config(&config_path, &paths, force, &output),
        },
        Commands::Watchlist { cmd } => {
            let mut store = session::open_selection(&config, &paths, &output);
            match cmd.unwrap_or(WatchlistCommands::List) {
                WatchlistCommands::List => watchlist::list(&store, &output),
                WatchlistCommands::Toggle { id } => watchlist::toggle(&load_catalog()?, &mut store, &id, &output),
                WatchlistCommands::Remove { id } => watchlist::remove(&mut store, &id, &output),
                WatchlistCommands::Clear { yes } => watchlist::clear(&mut store, yes, &output),
            }
        }
        Commands::Home { seed, per_rail } => {
            catalog::home(&load_catalog()?, &mut session::rng_for(seed), per_rail, &output)
        }
        Commands::Browse {
            content_type,
            genre,
            min_rating,
            year,
            sort,
            include_coming_soon,
            limit,
        } => {
            let filter = ContentFilter {
                content_type: content_type.map(ContentType::from),
                genre,
                min_rating,
                year,
                coming_soon: if include_coming_soon { None } else { Some(false) },
            };
            browse::run_browse(&load_catalog()?, &filter, sort.into(), limit, &output)
        }
        Commands::Search { query } => {
            let mut store = session::open_selection(&config, &paths, &output);
            catalog::search(&load_catalog()?, &mut store, &query.join(" "), &output)
        }
        Commands::Show { id } => {
            let mut store = session::open_selection(&config, &paths, &output);
            catalog::show(&load_catalog()?, &mut store, &id, &output)
        }
        Commands::Similar { id, limit } => catalog::similar(&load_catalog()?, &id, limit, &output),
        Commands::Top { limit } => {
            output.records("Top Rated", &load_catalog()?.top_rated(limit));
            Ok(())
        }
        Commands::Trending { limit } => {
            output.records("Trending Now", &load_catalog()?.trending(limit));
            Ok(())
        }
        Commands::Recent { limit } => {
            output.records("Recently Released", &load_catalog()?.recent_content(limit));
            Ok(())
        }
        Commands::ComingSoon => {
            output.records("Coming Soon", &load_catalog()?.coming_soon());
            Ok(())
        }
        Commands::Awards => {
            output.records("Award Winners", &load_catalog()?.award_winners());
            Ok(())
        }
        Commands::Year { year } => {
            output.records(&format!("Released in {}", year), &load_catalog()?.by_year(&year));
            Ok(())
        }
        Commands::RatingRange { min, max } => catalog::rating_range(&load_catalog()?, min, max, &output),
        Commands::Genre { genre } => {
            output.records(&genre, &load_catalog()?.by_genre(&genre));
            Ok(())
        }
        Commands::Random { count, seed } => {
            catalog::random(&load_catalog()?, &mut session::rng_for(seed), count, &output)
        }
        Commands::Stats => catalog::stats(&load_catalog()?, &output),
        Commands::Facets => catalog::facets(&load_catalog()?, &output),
    }
}
