mod analyze;
mod render;
mod show;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "watchstats")]
#[command(about = "Aggregate a watch-history export into viewing statistics")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze an exported watch-history JSON file and store the results
    Analyze {
        /// Path to the `.json` export
        file: PathBuf,
        /// Bucket dates and hours at this UTC offset instead of the configured one
        #[arg(long, allow_hyphen_values = true)]
        utc_offset_minutes: Option<i32>,
        /// Print the full statistics bundle as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the most recently stored statistics
    Show {
        /// Print the full statistics bundle as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove stored statistics
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = watchstats_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, store_dir = %config.store_dir.display(), "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Analyze {
            file,
            utc_offset_minutes,
            json,
        }) => analyze::run_analyze(&config, &file, utc_offset_minutes, json).await,
        Some(Commands::Show { json }) => show::run_show(&config, json),
        Some(Commands::Clear) => show::run_clear(&config),
        None => {
            println!("watchstats: run `watchstats --help` for usage");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
