//! Read-only JSON view of the game session.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use delve_engine::application::query_handlers::SessionSnapshot;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
#[instrument(skip(state))]
async fn get_session(State(state): State<AppState>) -> Result<Json<SessionSnapshot>, ApiError> {
    let snapshot = state.session.snapshot().await?;
    Ok(Json(snapshot))
}

/// Returns the router for the session view.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_session))
}
