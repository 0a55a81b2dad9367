//! Wordtrail · English Trainer Backend
//!
//! - Axum HTTP + WebSocket API (daily words, chat, progress, rewards)
//! - Progress persisted to a single JSON file
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   TRAINER_CONFIG_PATH : path to TOML config (content paths, training knobs, rewards)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info};

use wordtrail::config::load_config_from_env;
use wordtrail::routes::build_router;
use wordtrail::state::AppState;
use wordtrail::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Configuration and content problems are fatal: refuse to start half-configured.
  let cfg = load_config_from_env().inspect_err(|e| error!(target: "wordtrail", error = %e, "Invalid configuration"))?;
  let state = AppState::from_config(&cfg)
    .inspect_err(|e| error!(target: "wordtrail", error = %e, "Failed to load content"))?;

  let app = build_router(Arc::new(state));

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "wordtrail", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "wordtrail", "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    error!(target: "wordtrail", error = %e, "Failed to listen for shutdown signal");
  }
}
