//! Dungeon Delve — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use delve_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable holds an invalid value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::ActionNotFound(_) => (StatusCode::NOT_FOUND, "action_not_found"),
            DomainError::NotInCombat => (StatusCode::CONFLICT, "not_in_combat"),
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::SessionClosed => {
                (StatusCode::SERVICE_UNAVAILABLE, "session_unavailable")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: DomainError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_action_not_found_maps_to_404() {
        assert_eq!(
            status_of(DomainError::ActionNotFound("Dance".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_not_in_combat_maps_to_409() {
        assert_eq!(status_of(DomainError::NotInCombat), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(DomainError::Validation("bad input".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_session_closed_maps_to_503() {
        assert_eq!(
            status_of(DomainError::SessionClosed),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
