//! Concourse routing server
//!
//! Loads a building described by a manifest and answers routing requests
//! over HTTP.

mod config;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use concourse_core::GraphStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::routes::Limits;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(version, about = "Indoor routing server for airport terminals")]
struct Args {
    /// Path of the TOML configuration file
    #[arg(long, default_value = "concourse.toml")]
    config: PathBuf,
    /// Listen address, overrides `bind` from the config file
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "concourse_server=info,concourse_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ServerConfig::load(&args.config)?;
    let addr = args.bind.unwrap_or(config.bind);

    tracing::info!("Starting Concourse server");
    let building = config.building.clone();
    let store = tokio::task::spawn_blocking(move || GraphStore::open(building)).await?;
    if !store.is_loaded() {
        tracing::warn!("No building loaded; routes are unreachable until POST /api/admin/reload");
    }

    let state = AppState::new(Arc::new(store), config.frontier);
    let app = routes::router(
        state,
        Limits {
            request_timeout: config.request_timeout(),
            max_concurrent_requests: config.max_concurrent_requests,
        },
    );

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            return Err(format!("Failed to bind to {}: {}", addr, e).into());
        }
    };
    tracing::info!("Listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
        return Err(format!("Server error: {}", e).into());
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
