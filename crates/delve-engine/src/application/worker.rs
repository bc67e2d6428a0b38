//! Single-flight session worker and the cloneable handle used to reach it.
//!
//! The worker owns the [`Session`] and processes one message at a time, in
//! arrival order. Enemy turns queued while handling a message run right
//! after it, before the next message is taken, so autonomous behaviour is
//! serialized with player commands instead of racing them.

use std::sync::Arc;

use delve_core::error::DomainError;
use delve_core::rng::DeterministicRng;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::application::bus::{DEFAULT_BUS_CAPACITY, StateBus, Subscription};
use crate::application::command_handlers;
use crate::application::query_handlers::{self, SessionSnapshot};
use crate::application::render::Renderer;
use crate::application::script::Script;
use crate::application::session::{Pacing, Session};
use crate::domain::commands::{DispatchAction, HealFriendlies, ResetAdventure, SpawnReinforcement};

/// Default depth of the inbound message queue.
pub const DEFAULT_COMMAND_BUFFER: usize = 32;

/// Tuning for a spawned session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Snapshots buffered on the state bus.
    pub bus_capacity: usize,
    /// Messages buffered before senders wait.
    pub command_buffer: usize,
    /// Delays between visible steps.
    pub pacing: Pacing,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bus_capacity: DEFAULT_BUS_CAPACITY,
            command_buffer: DEFAULT_COMMAND_BUFFER,
            pacing: Pacing::default(),
        }
    }
}

/// Messages accepted by the session worker.
pub enum SessionMessage {
    /// Run an offered action.
    Dispatch {
        command: DispatchAction,
        reply: oneshot::Sender<Result<(), DomainError>>,
    },
    /// Restart the adventure.
    Reset {
        command: ResetAdventure,
        reply: oneshot::Sender<()>,
    },
    /// Heal the party.
    Heal {
        command: HealFriendlies,
        reply: oneshot::Sender<Result<(), DomainError>>,
    },
    /// Add an enemy to the running encounter.
    Spawn {
        command: SpawnReinforcement,
        reply: oneshot::Sender<Result<(), DomainError>>,
    },
    /// Render the current state.
    Render { reply: oneshot::Sender<String> },
    /// Read a snapshot of the current state.
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    /// Stop the worker.
    Shutdown,
}

/// Background task that owns the session.
pub struct SessionWorker {
    session: Session,
    script: Arc<dyn Script>,
    receiver: mpsc::Receiver<SessionMessage>,
}

impl SessionWorker {
    /// Creates a worker around an existing session.
    #[must_use]
    pub fn new(
        session: Session,
        script: Arc<dyn Script>,
        receiver: mpsc::Receiver<SessionMessage>,
    ) -> Self {
        Self {
            session,
            script,
            receiver,
        }
    }

    /// Processes messages until shutdown or until every handle is dropped.
    pub async fn run(mut self) {
        info!("session worker started");
        while let Some(message) = self.receiver.recv().await {
            if matches!(message, SessionMessage::Shutdown) {
                break;
            }
            self.handle(message).await;
            self.drain_follow_ups().await;
        }
        info!("session worker stopped");
    }

    async fn handle(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::Dispatch { command, reply } => {
                let result = command_handlers::handle_dispatch(&command, &mut self.session).await;
                if reply.send(result).is_err() {
                    debug!("Dispatch reply channel closed (caller dropped)");
                }
            }
            SessionMessage::Reset { command, reply } => {
                command_handlers::handle_reset(&command, &mut self.session, self.script.as_ref());
                if reply.send(()).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
            SessionMessage::Heal { command, reply } => {
                let result = command_handlers::handle_heal(&command, &mut self.session);
                if reply.send(result).is_err() {
                    debug!("Heal reply channel closed (caller dropped)");
                }
            }
            SessionMessage::Spawn { command, reply } => {
                let result = command_handlers::handle_spawn_reinforcement(
                    &command,
                    &mut self.session,
                    self.script.as_ref(),
                );
                if reply.send(result).is_err() {
                    debug!("Spawn reply channel closed (caller dropped)");
                }
            }
            SessionMessage::Render { reply } => {
                if reply.send(self.session.render()).is_err() {
                    debug!("Render reply channel closed (caller dropped)");
                }
            }
            SessionMessage::Snapshot { reply } => {
                if reply.send(query_handlers::snapshot(&self.session)).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            SessionMessage::Shutdown => {}
        }
    }

    async fn drain_follow_ups(&mut self) {
        while let Some(turn) = self.session.next_follow_up() {
            command_handlers::handle_enemy_turn(&turn, &mut self.session).await;
        }
    }
}

/// Starts a session for `script` on the current tokio runtime.
#[must_use]
pub fn spawn_session(
    script: Arc<dyn Script>,
    renderer: Arc<dyn Renderer>,
    rng: Box<dyn DeterministicRng + Send>,
    config: &SessionConfig,
) -> SessionHandle {
    let bus = StateBus::new(config.bus_capacity);
    let session = Session::new(
        script.new_adventure(),
        script.opening_scene(),
        bus.clone(),
        renderer,
        rng,
        config.pacing,
    );
    let (command_tx, command_rx) = mpsc::channel(config.command_buffer.max(1));
    tokio::spawn(SessionWorker::new(session, script, command_rx).run());
    SessionHandle { command_tx, bus }
}

/// Client-facing handle to the session worker.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<SessionMessage>,
    bus: StateBus,
}

impl SessionHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> SessionMessage,
    ) -> Result<T, DomainError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| DomainError::SessionClosed)?;
        reply_rx.await.map_err(|_| DomainError::SessionClosed)
    }

    /// Runs the offered action named in `command`.
    ///
    /// Returns once the action completes; enemy turns it triggers keep
    /// running on the worker.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ActionNotFound` for an unknown name, the
    /// action's own error, or `DomainError::SessionClosed`.
    pub async fn dispatch(&self, command: DispatchAction) -> Result<(), DomainError> {
        self.request(|reply| SessionMessage::Dispatch { command, reply })
            .await?
    }

    /// Restarts the adventure.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionClosed` if the worker stopped.
    pub async fn reset(&self, command: ResetAdventure) -> Result<(), DomainError> {
        self.request(|reply| SessionMessage::Reset { command, reply })
            .await
    }

    /// Adds health to every party member.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a non-positive amount, or
    /// `DomainError::SessionClosed`.
    pub async fn heal_friendlies(&self, command: HealFriendlies) -> Result<(), DomainError> {
        self.request(|reply| SessionMessage::Heal { command, reply })
            .await?
    }

    /// Brings a reinforcement into the running encounter.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotInCombat` outside combat, or
    /// `DomainError::SessionClosed`.
    pub async fn spawn_reinforcement(
        &self,
        command: SpawnReinforcement,
    ) -> Result<(), DomainError> {
        self.request(|reply| SessionMessage::Spawn { command, reply })
            .await?
    }

    /// Renders the current state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionClosed` if the worker stopped.
    pub async fn render(&self) -> Result<String, DomainError> {
        self.request(|reply| SessionMessage::Render { reply }).await
    }

    /// Reads a snapshot of the current state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionClosed` if the worker stopped.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, DomainError> {
        self.request(|reply| SessionMessage::Snapshot { reply })
            .await
    }

    /// Subscribes to rendered snapshots published from now on.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }

    /// Asks the worker to stop after the messages already queued.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionClosed` if the worker already stopped.
    pub async fn shutdown(&self) -> Result<(), DomainError> {
        self.command_tx
            .send(SessionMessage::Shutdown)
            .await
            .map_err(|_| DomainError::SessionClosed)
    }
}
