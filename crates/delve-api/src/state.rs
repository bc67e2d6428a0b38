//! Shared application state.

use delve_engine::application::worker::SessionHandle;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Handle to the game session worker.
    pub session: SessionHandle,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }
}
