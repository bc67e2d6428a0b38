//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use delve_api::display::HtmlDisplay;
use delve_api::state::AppState;
use delve_content::DungeonDelve;
use delve_engine::application::session::Pacing;
use delve_engine::application::worker::{SessionConfig, SessionHandle, spawn_session};
use delve_test_support::SequenceRng;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build the full app router over a fresh Dungeon Delve session with no
/// delays. The shuffle gives the turn order Hero, Orc, Goblin, Companion;
/// `targets` feed the enemies' choice of victim.
pub fn build_test_app(targets: &[u32]) -> (Router, SessionHandle) {
    let mut values = vec![3, 0, 1];
    values.extend_from_slice(targets);
    let config = SessionConfig {
        pacing: Pacing::instant(),
        ..SessionConfig::default()
    };
    let session = spawn_session(
        Arc::new(DungeonDelve),
        Arc::new(HtmlDisplay),
        Box::new(SequenceRng::new(values)),
        &config,
    );
    let app = delve_api::build_router(AppState::new(session.clone()));
    (app, session)
}

/// Send a request without a body and return the status and raw body.
pub async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

/// Send a POST request without a body and return the status and body.
pub async fn post(app: Router, uri: &str) -> (StatusCode, String) {
    send(app, "POST", uri).await
}

/// Send a GET request and return the response as JSON.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(app, "GET", uri).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    (status, json)
}

/// Send a POST request and return the response as JSON.
pub async fn post_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = post(app, uri).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    (status, json)
}

/// Plays the opening up to the first combat turn.
pub async fn enter_combat(app: &Router) {
    for uri in ["/action/START", "/action/Approach", "/action/Enter%20Combat"] {
        let (status, _) = post(app.clone(), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
}
