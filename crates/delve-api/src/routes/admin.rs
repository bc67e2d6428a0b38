//! Operator routes for steering the running session.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{Router, routing::post};
use delve_engine::domain::commands::{HealFriendlies, ResetAdventure, SpawnReinforcement};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Health added per party member when no amount is given.
pub const DEFAULT_HEAL_AMOUNT: i32 = 20;

/// Query parameters for POST /add-health.
#[derive(Debug, Deserialize)]
pub struct AddHealthParams {
    /// Health added to each party member.
    pub amount: Option<i32>,
}

/// POST /reset-game
#[instrument(skip(state))]
async fn reset_game(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let command = ResetAdventure {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling reset_adventure command");

    state.session.reset(command).await?;
    Ok(StatusCode::OK)
}

/// POST /add-health
#[instrument(skip(state))]
async fn add_health(
    State(state): State<AppState>,
    Query(params): Query<AddHealthParams>,
) -> Result<StatusCode, ApiError> {
    let command = HealFriendlies {
        correlation_id: Uuid::new_v4(),
        amount: params.amount.unwrap_or(DEFAULT_HEAL_AMOUNT),
    };

    info!(
        correlation_id = %command.correlation_id,
        amount = command.amount,
        "handling heal_friendlies command"
    );

    state.session.heal_friendlies(command).await?;
    Ok(StatusCode::OK)
}

/// POST /add-enemy
#[instrument(skip(state))]
async fn add_enemy(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let command = SpawnReinforcement {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling spawn_reinforcement command");

    state.session.spawn_reinforcement(command).await?;
    Ok(StatusCode::OK)
}

/// Returns the router for the admin panel.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reset-game", post(reset_game))
        .route("/add-health", post(add_health))
        .route("/add-enemy", post(add_enemy))
}
