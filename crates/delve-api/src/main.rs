//! Dungeon Delve API server entry point.

use std::error::Error;
use std::sync::Arc;

use delve_api::config::AppConfig;
use delve_api::display::HtmlDisplay;
use delve_api::state::AppState;
use delve_content::DungeonDelve;
use delve_core::rng::SystemRng;
use delve_engine::application::worker::{SessionHandle, spawn_session};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Dungeon Delve API server");

    // Read configuration from environment.
    let config = AppConfig::from_env()?;

    // Start the game session.
    let session = spawn_session(
        Arc::new(DungeonDelve),
        Arc::new(HtmlDisplay),
        Box::new(SystemRng::new()),
        &config.session,
    );

    // Build router.
    let app = delve_api::build_router(AppState::new(session.clone()));

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(session))
        .await?;

    Ok(())
}

/// Resolves on Ctrl-C, after asking the session worker to stop.
async fn shutdown_signal(session: SessionHandle) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
    if session.shutdown().await.is_err() {
        tracing::debug!("session worker already stopped");
    }
}
