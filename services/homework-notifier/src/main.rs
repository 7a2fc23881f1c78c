//! Homework Notifier CLI
//!
//! Command-line interface for the homework review status notifier.

use std::path::PathBuf;

use clap::Parser;
use homework_notifier::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-notifier")]
#[command(about = "Forwards homework review status changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between polls (overrides config file)
    #[arg(long)]
    retry_interval: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, retry_interval={:?}, log_level={:?}",
        args.config,
        args.retry_interval,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets();

    if let Some(retry_interval) = args.retry_interval {
        config.polling.retry_interval_seconds = retry_interval;
    }

    if let Err(e) = config.validate() {
        tracing::error!("Cannot start: {}", e);
        return Err(e.into());
    }
    if let Err(e) = config.check_tokens() {
        tracing::error!("Cannot start: {}", e);
        return Err(e.into());
    }

    tracing::info!("Starting homework notifier");
    tracing::debug!(
        "Endpoint: {}, interval: {}s, schema mode: {:?}",
        config.api.endpoint,
        config.polling.retry_interval_seconds,
        config.polling.schema_mode
    );

    homework_notifier::run(config).await?;

    Ok(())
}
