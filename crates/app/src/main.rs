//! Larder - Main Entry Point

use std::io;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use larder::cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = larder::load_settings(cli.api_url)?;
    tracing::debug!(api_url = %settings.api_url, "Starting Larder v{}", env!("CARGO_PKG_VERSION"));

    let session = larder::restore_session().await;
    let watcher = larder::watch_session(&session);
    let api = larder::connect(&settings, session)?;

    let result = larder::commands::run(&api, cli.command, &mut io::stdout().lock()).await;

    // Dropping the last session handle closes the event channel
    drop(api);
    if let Err(e) = watcher.await {
        tracing::warn!(error = %e, "Session watcher failed");
    }

    result.map_err(Into::into)
}
