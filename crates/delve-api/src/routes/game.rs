//! Player-facing routes: the page, the live event stream and actions.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::Html;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::{get, post};
use axum::{Json, Router};
use delve_engine::domain::commands::DispatchAction;
use serde::Serialize;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::display;
use crate::error::ApiError;
use crate::state::AppState;

/// Response body returned after an action ran.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// The correlation ID the command was handled under.
    pub correlation_id: Uuid,
    /// The action that ran.
    pub action: String,
}

/// GET /
#[instrument(skip(state))]
async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let board = state.session.render().await?;
    Ok(Html(display::page(&board)))
}

/// GET /events
#[instrument(skip(state))]
async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("viewer connected");
    let stream = state
        .session
        .subscribe()
        .into_stream()
        .map(|board| Ok(Event::default().data(board)));
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// POST /action/{name}
#[instrument(skip(state))]
async fn run_action(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ActionResponse>, ApiError> {
    let command = DispatchAction::new(name);

    info!(correlation_id = %command.correlation_id, "handling dispatch_action command");

    let correlation_id = command.correlation_id;
    let action = command.action_name.clone();
    state.session.dispatch(command).await?;

    Ok(Json(ActionResponse {
        correlation_id,
        action,
    }))
}

/// Returns the router for the game board.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/events", get(events))
        .route("/action/{name}", post(run_action))
}
