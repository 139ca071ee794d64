//! Wallet ledger server binary

use anyhow::Context;
use wallet_ledger::{Config, Ledger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting wallet ledger server");

    // Load configuration: explicit file if named, env overrides otherwise
    let config = match std::env::var("LEDGER_CONFIG") {
        Ok(path) => Config::from_file(&path).with_context(|| format!("load config {}", path))?,
        Err(_) => Config::from_env().context("load config from environment")?,
    };

    let ledger = Ledger::open(config).await.context("open ledger")?;
    tracing::info!("Ledger opened successfully");

    // The wire layer in front of this core is deployed separately; the
    // binary keeps the store open until asked to stop.
    tokio::signal::ctrl_c().await.context("wait for shutdown signal")?;

    tracing::info!("Shutting down wallet ledger server");
    ledger.close().await?;

    Ok(())
}
