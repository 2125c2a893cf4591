//! # passgate-api: Binary Entry Point
//!
//! Loads the drop configuration named by `PASSGATE_CONFIG` (default
//! `drop.yaml`) and serves it. Binds to `PORT` (default 8080).

use std::sync::Arc;

use anyhow::Context;

use passgate_core::SystemClock;
use passgate_issuance::{ClaimGate, DropConfig};
use passgate_api::state::{AppState, DynClock};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let config_path =
        std::env::var("PASSGATE_CONFIG").unwrap_or_else(|_| "drop.yaml".to_string());

    let config = DropConfig::load(std::path::Path::new(&config_path))
        .with_context(|| format!("loading drop configuration from {config_path}"))?;
    let clock: DynClock = Arc::new(SystemClock);
    let gate = ClaimGate::in_memory(&config, clock).context("configuring claim gate")?;

    let app = passgate_api::app(AppState::new(gate));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(drop = %config.name, "passgate API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
