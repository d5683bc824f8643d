//! dit-etl - NCCS data pipeline
//!
//! Downloads NCCS IRS 990 efile tables, merges them into a combined
//! organization dataset and transforms that dataset into the donation tracker
//! JSON exports served by dit-api.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dit_common::config::{load_toml_config, ConfigOverrides, Settings};
use dit_etl::combine::combine_and_save;
use dit_etl::fetcher::NccsFetcher;
use dit_etl::Transformer;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for dit-etl
#[derive(Parser, Debug)]
#[command(name = "dit-etl")]
#[command(about = "NCCS data fetcher and donation tracker transformer")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "DIT_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding raw CSV tables and the combined dataset
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory receiving the transformed JSON files
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Seed for reproducible synthesis
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Maximum data rows read per CSV table
    #[arg(long, global = true)]
    max_records: Option<usize>,

    /// Maximum organizations fed to the transformer
    #[arg(long, global = true)]
    max_organizations: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download tables, then build the combined dataset and summary
    Fetch,
    /// Build the combined dataset and summary from local tables only
    Combine,
    /// Transform the combined dataset into donation tracker exports
    Transform,
    /// Fetch, then transform
    Run,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_dir: self.data_dir.clone(),
            output_dir: self.output_dir.clone(),
            seed: self.seed,
            max_records: self.max_records,
            max_organizations: self.max_organizations,
            api_port: None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (toml_config, config_source) =
        load_toml_config(args.config.as_deref()).context("Failed to load config")?;
    let settings =
        Settings::resolve(&args.overrides(), &toml_config).context("Invalid configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    config_source.log();
    info!("Starting dit-etl v{}", env!("CARGO_PKG_VERSION"));
    info!(
        data_dir = %settings.data_dir.display(),
        output_dir = %settings.output_dir.display(),
        seed = ?settings.seed,
        "Resolved configuration"
    );

    match args.command {
        Command::Fetch => fetch(&settings).await?,
        Command::Combine => combine(&settings)?,
        Command::Transform => transform(&settings)?,
        Command::Run => {
            fetch(&settings).await?;
            transform(&settings)?;
        }
    }

    Ok(())
}

async fn fetch(settings: &Settings) -> Result<()> {
    let fetcher = NccsFetcher::from_settings(settings).context("Failed to create HTTP client")?;
    let report = fetcher
        .download_tables()
        .await
        .context("Failed to download NCCS tables")?;

    for failure in &report.failed {
        warn!(
            table = %failure.table,
            year = failure.year,
            reason = %failure.reason,
            "Table left out of combined dataset"
        );
    }

    combine(settings)
}

fn combine(settings: &Settings) -> Result<()> {
    let summary = combine_and_save(settings).context("Failed to build combined dataset")?;
    info!(
        organizations = summary.total_organizations,
        total_revenue = summary.total_revenue,
        "NCCS data combined"
    );
    Ok(())
}

fn transform(settings: &Settings) -> Result<()> {
    let mut transformer = Transformer::from_settings(settings);
    let output = transformer.run().context("Data transformation failed")?;
    info!(
        campaigns = output.bundle.campaigns.len(),
        donations = output.bundle.donations.len(),
        impact_locations = output.bundle.impact_locations.len(),
        dir = %transformer.output_dir().display(),
        "Exports written"
    );
    Ok(())
}
