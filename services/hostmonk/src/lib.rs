//! HostMonk - Self-hosted service dashboard
//!
//! Loads a YAML service list, probes each service for liveness, and serves
//! themed status cards.

pub mod config;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod icons;
pub mod io;
pub mod monitor;
pub mod state;
pub mod theme;

pub use config::{load_config, load_config_or_default, normalize, DashboardConfig, Service};
pub use error::{HostmonkError, Result};

use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::engine::Engine;
use crate::io::{HttpClient, ReqwestHttpClient};

pub const DEFAULT_PORT: u16 = 11120;

/// Run the dashboard with the given configuration until Ctrl-C
pub async fn run(config: DashboardConfig, port: u16) -> Result<()> {
    let cancel = CancellationToken::new();

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                cancel_for_signal.cancel();
            }
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
    });

    serve(config, SocketAddr::from(([0, 0, 0, 0], port)), cancel).await
}

/// Start monitors and serve the dashboard on `addr` until `cancel` fires
pub async fn serve(
    config: DashboardConfig,
    addr: SocketAddr,
    cancel: CancellationToken,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        HostmonkError::Dashboard(format!("Failed to bind dashboard to {}: {}", addr, e))
    })?;
    serve_on(config, listener, cancel).await
}

/// Like [`serve`], on an already-bound listener
pub async fn serve_on(
    config: DashboardConfig,
    listener: tokio::net::TcpListener,
    cancel: CancellationToken,
) -> Result<()> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let engine = Engine::start(&config, http);
    let state = state::new_state_handle(config, engine.subscribers());
    let router = dashboard::build_router(state);

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Dashboard listening on http://{}", addr);
    }

    let result = axum::serve(listener, router)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await
        .map_err(|e| HostmonkError::Dashboard(format!("Server error: {}", e)));

    engine.shutdown().await;
    tracing::info!("HostMonk stopped");

    result
}
