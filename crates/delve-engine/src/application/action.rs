//! Named, dispatchable units of session logic.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use delve_core::error::DomainError;
use tracing::{debug, warn};

use crate::application::session::Session;

/// The logic an [`Action`] runs against the session.
#[async_trait]
pub trait ActionBody: Send + Sync {
    /// Mutates the session. Rendering and publishing happen afterwards.
    async fn run(&self, session: &mut Session) -> Result<(), DomainError>;
}

/// Adapts a synchronous closure into an [`ActionBody`].
pub struct FnBody<F>(pub F);

#[async_trait]
impl<F> ActionBody for FnBody<F>
where
    F: Fn(&mut Session) -> Result<(), DomainError> + Send + Sync,
{
    async fn run(&self, session: &mut Session) -> Result<(), DomainError> {
        (self.0)(session)
    }
}

/// A named action offered to players.
///
/// Built fresh whenever the set of legal actions changes and never mutated
/// afterwards. The name is the dispatch key.
#[derive(Clone)]
pub struct Action {
    name: String,
    body: Arc<dyn ActionBody>,
}

impl Action {
    /// Creates an action from a body.
    #[must_use]
    pub fn new(name: impl Into<String>, body: impl ActionBody + 'static) -> Self {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }

    /// Creates an action from a synchronous closure.
    #[must_use]
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Session) -> Result<(), DomainError> + Send + Sync + 'static,
    {
        Self::new(name, FnBody(f))
    }

    /// The dispatch key shown to players.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the pre-hook, the body, then the post-hook.
    ///
    /// The post-hook renders the session as it is after the body and
    /// publishes it exactly once, whether or not the body succeeded. A body
    /// error is logged and handed back to the caller only.
    ///
    /// # Errors
    ///
    /// Returns the body's error.
    pub async fn run(&self, session: &mut Session) -> Result<(), DomainError> {
        debug!(action = %self.name, "running action");
        let result = self.body.run(session).await;
        if let Err(err) = &result {
            warn!(action = %self.name, error = %err, "action body failed");
        }
        session.publish();
        debug!(action = %self.name, "action completed");
        result
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish()
    }
}

/// Finds the action named `name`.
#[must_use]
pub fn find<'a>(actions: &'a [Action], name: &str) -> Option<&'a Action> {
    actions.iter().find(|a| a.name == name)
}

/// Returns `base`, or `base #n` with the smallest `n >= 2` not yet taken.
#[must_use]
pub fn unique_name(taken: &[Action], base: String) -> String {
    if find(taken, &base).is_none() {
        return base;
    }
    (2..)
        .map(|n| format!("{base} #{n}"))
        .find(|candidate| find(taken, candidate).is_none())
        .unwrap_or(base)
}
