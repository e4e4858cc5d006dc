//! AssetBridge command-line front end
//!
//! Stands in for the host: loads configuration once, builds the adapter and
//! prints each operation's result as JSON.

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use assetbridge_core::{AssetSearchAdapter, Config};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "assetbridge")]
#[command(about = "Search a DAM and copy files from it", long_about = None)]
struct Cli {
    /// JSON configuration file; `ASSETBRIDGE_*` environment variables override it
    #[arg(long, short, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Show the placeholder root listing")]
    List,
    #[command(about = "Search the DAM; omit TEXT to match everything")]
    Search {
        #[arg(value_name = "TEXT")]
        text: Option<String>,
    },
    #[command(about = "Copy a search result into storage using its reference")]
    Fetch {
        #[arg(value_name = "REFERENCE")]
        reference: String,
        #[arg(value_name = "FILENAME")]
        filename: String,
        /// Storage directory override
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    #[command(about = "Describe the configuration fields")]
    Fields,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    assetbridge_core::init_logging();
    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Fields => commands::fields(),
        Commands::List => commands::list(&adapter(cli.config.as_deref(), None)?),
        Commands::Search { text } => {
            commands::search(&adapter(cli.config.as_deref(), None)?, text.as_deref()).await
        }
        Commands::Fetch {
            reference,
            filename,
            dir,
        } => commands::fetch(&adapter(cli.config.as_deref(), dir)?, &reference, &filename).await,
    };

    let output = output?;
    println!("{}", output.json);
    if !output.success {
        std::process::exit(1);
    }
    Ok(())
}

fn adapter(
    config_path: Option<&std::path::Path>,
    storage_dir: Option<PathBuf>,
) -> anyhow::Result<AssetSearchAdapter> {
    let mut config = Config::load(config_path).context("failed to load configuration")?;
    if let Some(dir) = storage_dir {
        config = config.with_storage_dir(dir);
    }

    AssetSearchAdapter::new(config).context("invalid configuration")
}
