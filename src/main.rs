//! dsearch: Multi-Source Search-Result Extraction and Merge Engine
//!
//! Command-line front end: searches every enabled source and prints or saves
//! the merged results.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dsearch::config::{Config, LogFormat, LoggingConfig, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::search::{OutputFormat, SearchArgs};

#[derive(Parser)]
#[command(name = "dsearch")]
#[command(about = "Search several web sources and merge their results")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search every enabled source for a keyword
    Search {
        /// Search keyword
        keyword: String,

        /// First result page (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Number of consecutive pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write a plain-text report file
        #[arg(long)]
        save: bool,

        /// Directory for saved reports
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Write a default configuration file
    Init {
        /// Directory to create the configuration in
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    init_logging(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Search {
            keyword,
            page,
            pages,
            format,
            save,
            output_dir,
        } => {
            let args = SearchArgs {
                keyword,
                page,
                pages,
                format,
                save,
                output_dir,
            };
            commands::search::run_search(config, args).await
        }
        Commands::Init { path } => commands::init::init_config(path),
    }
}

/// Install the global subscriber; `RUST_LOG` overrides the configured level
fn init_logging(logging: &LoggingConfig, verbose: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = match logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
