use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod process;

#[derive(Debug, Parser)]
#[command(name = "pricelens-cli")]
#[command(about = "Pricelens scrape-record pipeline and catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize raw scrape records from a JSON-lines file and ingest them
    /// into the catalog.
    Process {
        /// Path to the JSON-lines file of raw scrape records.
        #[arg(long)]
        input: PathBuf,
        /// Source site the records came from; defaults to the configured
        /// default site.
        #[arg(long)]
        site: Option<String>,
        /// Override the site registry path from the config.
        #[arg(long)]
        sites_path: Option<PathBuf>,
    },
    /// List the configured source sites.
    Sites {
        /// Override the site registry path from the config.
        #[arg(long)]
        sites_path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pricelens_core::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_level))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Process {
            input,
            site,
            sites_path,
        } => process::run_process(&config, &input, site.as_deref(), sites_path.as_deref()),
        Commands::Sites { sites_path } => {
            let path = sites_path.unwrap_or_else(|| config.sites_path.clone());
            let sites_file = pricelens_core::load_sites(&path)?;
            for site in &sites_file.sites {
                println!(
                    "{}  {}  (category separator: {:?})",
                    site.name, site.base_url, site.category_separator
                );
            }
            Ok(())
        }
    }
}
