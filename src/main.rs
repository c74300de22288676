use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use naver_corpus::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "naver-corpus",
    version,
    about = "Builds a Korean text corpus from one day of Naver News articles",
    long_about = None
)]
struct Cli {
    /// Day to crawl (YYYYMMDD)
    #[arg(long)]
    day: String,

    /// TOML configuration file (defaults come from NAVER_CORPUS_* variables)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output root; articles go to <output>/<day>/
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Listing pages per category
    #[arg(long)]
    max_page: Option<u32>,

    /// Number of article workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Keep the reporter byline in the first line
    #[arg(long)]
    include_reporter_name: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log format (text, json); overrides [logging].format
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Initialize tracing/logging
    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let format = cli.log_format.as_deref().unwrap_or(&config.logging.format);
    setup_tracing(format, level)?;

    tracing::info!("naver-corpus starting");

    tracing::info!(
        day = %cli.day,
        categories = ?config.listing.categories,
        max_page = config.listing.max_page,
        workers = config.crawler.max_concurrent_requests,
        output = %config.output.root.display(),
        "Starting crawl command"
    );

    commands::crawl(config, &cli.day).await?;

    tracing::info!("naver-corpus completed successfully");
    Ok(())
}

/// File or environment config with command-line overrides applied on top
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    if let Some(output) = &cli.output {
        config.output.root = output.clone();
    }
    if let Some(max_page) = cli.max_page {
        config.listing.max_page = max_page;
    }
    if let Some(workers) = cli.workers {
        config.crawler.max_concurrent_requests = workers;
    }
    if cli.include_reporter_name {
        config.extract.include_reporter_name = true;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn setup_tracing(format: &str, level: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_new(format!("naver_corpus={level},warn"))
        .with_context(|| format!("Invalid log level: {level}"))?;

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
