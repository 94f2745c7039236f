use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{chat, config, info, links};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "cinebot")]
#[command(about = "cinebot - Look up movies across TMDB and OMDb and answer chat commands")]
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

    /// Directory holding config.toml and credentials.toml
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Write logs to the daily-rotated file under the config directory instead of stderr
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a title and print the reconciled record
    #[command(long_about = "Search the primary catalog for TITLE, cross-reference it against the secondary catalog according to the configured strategy, and print the merged record with its derived links.")]
    Info {
        /// Free-text movie title
        title: String,
    },
    /// Derive catalog and streaming links without calling any catalog
    Links {
        /// Movie title used for the catalog slug
        title: String,

        /// Cross-reference id (e.g. tt1375666) for the streaming link
        #[arg(long, value_name = "ID")]
        cross_ref: Option<String>,
    },
    /// Answer chat commands read line by line from stdin
    #[command(long_about = "Read chat messages from stdin and answer them the way the bot would in a channel. Supports /info, /links, /addwatchlist, /watchlist, /clearwatchlist, /rank, /myranks, /leaderboard and /help. Watchlist and rankings last until stdin closes.")]
    Chat {
        /// Channel the messages are posted in
        #[arg(long, default_value = "general")]
        channel: String,

        /// User the messages are posted by
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Inspect or create configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks API keys)
    Show {
        /// Show API keys unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store API keys in credentials.toml
    #[command(long_about = "Store catalog API keys in credentials.toml. The TMDB_API_KEY and OMDB_API_KEY environment variables override stored keys.")]
    Keys {
        /// TMDB API key
        #[arg(long)]
        tmdb: Option<String>,

        /// OMDb API key
        #[arg(long)]
        omdb: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = commands::path_manager(cli.config_dir).map_err(|e| eyre!("{}", e))?;
    let reads_config = !matches!(cli.command, Commands::Config { .. });
    let config = commands::startup_config(&paths, reads_config).map_err(|e| eyre!("{:#}", e))?;

    // Relative paths in [logging] file are taken from the log directory
    let log_file = match &config.logging.file {
        Some(file) if file.is_relative() => Some(paths.log_dir().join(file)),
        Some(file) => Some(file.clone()),
        None if cli.log_file => Some(paths.log_file()),
        None => None,
    };
    logging::init_logging(cli.verbose, cli.quiet, &config.logging, log_file.as_deref()).map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Info { title } => info::run_info(&paths, &config, &title, &output).await,
        Commands::Links { title, cross_ref } => links::run_links(&config, &title, cross_ref.as_deref(), &output),
        Commands::Chat { channel, user } => chat::run_chat(&paths, &config, channel, user, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &paths, &output),
    }
}
