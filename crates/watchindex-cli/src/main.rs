use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{clear, config, favorites, Store};
use std::path::{Path, PathBuf};
use watchindex_config::{Config, PathManager};
use watchindex_models::{MediaFilter, MediaType};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchindex")]
#[command(about = "WatchIndex - Keep a list of the movies and TV shows you love")]
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

    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List favorites in the order they were added
    List {
        /// Only show one media type: all, movie or tv
        #[arg(long = "type", value_name = "TYPE", default_value = "all")]
        filter: MediaFilter,
    },
    /// Add a movie or show to favorites
    #[command(long_about = "Add a movie or show to favorites. Identity is the pair of --id and --type; adding a pair that is already a favorite changes nothing. Use --from-json to add snapshots in TMDB shape from a file or stdin ('-').")]
    Add(AddArgs),
    /// Remove a movie or show from favorites
    Remove {
        /// TMDB id
        #[arg(long)]
        id: u32,

        /// Media type: movie or tv
        #[arg(long = "type", value_name = "TYPE")]
        media_type: MediaType,
    },
    /// Check whether a movie or show is a favorite
    Check {
        /// TMDB id
        #[arg(long)]
        id: u32,

        /// Media type: movie or tv
        #[arg(long = "type", value_name = "TYPE")]
        media_type: MediaType,
    },
    /// Show how many favorites there are, per media type
    Count,
    /// Remove all favorites
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// TMDB id
    #[arg(long, required_unless_present = "from_json")]
    pub id: Option<u32>,

    /// Media type: movie or tv
    #[arg(long = "type", value_name = "TYPE", required_unless_present = "from_json")]
    pub media_type: Option<MediaType>,

    /// Movie title
    #[arg(long)]
    pub title: Option<String>,

    /// Show name
    #[arg(long)]
    pub name: Option<String>,

    /// Relative TMDB poster path, e.g. /pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg
    #[arg(long)]
    pub poster_path: Option<String>,

    /// Relative TMDB backdrop path
    #[arg(long)]
    pub backdrop_path: Option<String>,

    /// Movie release date (YYYY-MM-DD)
    #[arg(long)]
    pub release_date: Option<String>,

    /// Show first air date (YYYY-MM-DD)
    #[arg(long)]
    pub first_air_date: Option<String>,

    /// Rating at the time of favoriting (0-10)
    #[arg(long)]
    pub vote_average: Option<f64>,

    /// Plot overview
    #[arg(long)]
    pub overview: Option<String>,

    /// Genre id (repeatable)
    #[arg(long = "genre-id", value_name = "ID")]
    pub genre_ids: Vec<u32>,

    /// Read one snapshot or an array of snapshots from a JSON file ('-' for stdin)
    #[arg(long, value_name = "PATH", conflicts_with_all = ["id", "media_type"])]
    pub from_json: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default config.toml
    Init {
        /// Overwrite an existing file without asking
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Print the config file location
    Path,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file());
    let loaded = Config::load_or_default(&config_path);

    // A broken config file should not stop `config init` from replacing it
    let logging_config = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    logging::init_logging(cli.verbose, cli.quiet, &logging_config, &paths).map_err(|e| eyre!("{}", e))?;

    tracing::debug!("Using config file {}", config_path.display());
    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::List { filter } => {
            let store = open_store(loaded, &paths, &config_path)?;
            favorites::run_list(&store, filter, &output)
        }
        Commands::Add(args) => {
            let mut store = open_store(loaded, &paths, &config_path)?;
            favorites::run_add(&mut store, args, &output)
        }
        Commands::Remove { id, media_type } => {
            let mut store = open_store(loaded, &paths, &config_path)?;
            favorites::run_remove(&mut store, id, media_type, &output)
        }
        Commands::Check { id, media_type } => {
            let store = open_store(loaded, &paths, &config_path)?;
            favorites::run_check(&store, id, media_type, &output)
        }
        Commands::Count => {
            let store = open_store(loaded, &paths, &config_path)?;
            favorites::run_count(&store, &output)
        }
        Commands::Clear { yes } => {
            let mut store = open_store(loaded, &paths, &config_path)?;
            clear::run_clear(&mut store, yes, &output)
        }
        Commands::Config { cmd } => config::run_config(cmd, &paths, &config_path, loaded, &output),
    }
}

fn open_store(loaded: anyhow::Result<Config>, paths: &PathManager, config_path: &Path) -> color_eyre::Result<Store> {
    let config = loaded
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_path.display(), e))?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration in {}: {}", config_path.display(), e))?;
    Ok(watchindex_core::open_store(&config, paths))
}
