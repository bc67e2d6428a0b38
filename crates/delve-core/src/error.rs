//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Every variant is scoped to a single command or a single background
/// turn; none of them is fatal to the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// No action with this name is currently offered.
    #[error("action not found: {0}")]
    ActionNotFound(String),

    /// The operation requires the combat scene to be active.
    #[error("not in combat")]
    NotInCombat,

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// The session worker has stopped and no longer accepts commands.
    #[error("session closed")]
    SessionClosed,
}
