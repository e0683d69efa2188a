mod depots;
mod generate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use depotgen_core::config::{DEFAULT_SCRAPER_BASE_URL, DEFAULT_SCRAPER_USER_AGENT};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "depotgen-cli")]
#[command(about = "Look up Steam depots and generate placeholder manifest packages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch and print the depots of one or more applications as JSON
    Depots {
        /// Application ids to look up
        #[arg(required = true)]
        app_ids: Vec<String>,

        /// Maximum number of lookups in flight
        #[arg(long, default_value_t = 4)]
        concurrency: usize,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Write a manifest package zip to disk
    Generate {
        #[arg(long)]
        app_id: String,

        #[arg(long)]
        depot_id: String,

        /// Defaults to a placeholder id
        #[arg(long)]
        manifest_id: Option<String>,

        /// Output file or directory (default: current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct SourceArgs {
    #[arg(long, env = "DEPOTGEN_SCRAPER_BASE_URL", default_value = DEFAULT_SCRAPER_BASE_URL)]
    base_url: String,

    #[arg(long, env = "DEPOTGEN_SCRAPER_REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[arg(long, env = "DEPOTGEN_SCRAPER_USER_AGENT", default_value = DEFAULT_SCRAPER_USER_AGENT)]
    user_agent: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Depots {
            app_ids,
            concurrency,
            source,
        } => depots::run_depots(&app_ids, concurrency, &source).await,
        Commands::Generate {
            app_id,
            depot_id,
            manifest_id,
            out,
        } => {
            generate::run_generate(&app_id, &depot_id, manifest_id.as_deref(), out.as_deref())
                .await
        }
    }
}

#[cfg(test)]
mod tests;
