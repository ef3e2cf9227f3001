//! # askdoc-server
//!
//! The HTTP surface of the document-scoped QA assistant: session management,
//! the per-turn chat endpoint, history listing, answer download, and feedback
//! submission.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

use crate::config::AppConfig;
use crate::state::build_app_state;
use tracing::{debug, info};

/// The main entry point for running the server.
pub async fn run(listener: tokio::net::TcpListener, config: AppConfig) -> anyhow::Result<()> {
    debug!(?config, "Server configuration loaded");

    let app_state = build_app_state(config).await?;
    let app = router::create_router(app_state);

    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
