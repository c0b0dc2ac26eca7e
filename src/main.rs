//! Provider gateway server.

use anyhow::Context;
use clap::Parser;
use provider_gateway::api::rest::create_router;
use provider_gateway::app::{Stores, build_state};
use provider_gateway::config::GatewayConfig;
use provider_gateway::telemetry::init_logging;
use std::sync::Arc;
use tracing::info;

/// Telecom provider quote gateway.
#[derive(Debug, Parser)]
#[command(name = "provider-gateway", version, about)]
struct Cli {
    /// Configuration file (TOML).
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<String>,

    /// Listen address, overrides `server.bind_addr`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config =
        GatewayConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }

    init_logging(config.logging.json).context("failed to initialize logging")?;

    let stores = Stores::from_config(&config)
        .await
        .context("failed to open stores")?;
    let state = build_state(&config, stores).context("failed to build provider registry")?;
    let router = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    info!(addr = %config.server.bind_addr, "provider gateway listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("provider gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
