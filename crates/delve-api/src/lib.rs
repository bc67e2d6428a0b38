//! Dungeon Delve — HTTP surface.
//!
//! Serves the game board, streams every published snapshot over
//! server-sent events and forwards player and operator commands to the
//! session worker.

pub mod config;
pub mod display;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(app_state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    Router::new()
        .merge(routes::health::router())
        .merge(routes::game::router())
        .nest("/admin", routes::admin::router())
        .nest("/api/v1/session", routes::session::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
