//! Commands accepted by the session.

use delve_core::command::Command;
use uuid::Uuid;

use crate::domain::character::CharacterId;

/// Command to run the offered action with the given name.
#[derive(Debug, Clone)]
pub struct DispatchAction {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Name of the action, as offered to players.
    pub action_name: String,
}

impl DispatchAction {
    /// Creates a dispatch command with a fresh correlation ID.
    #[must_use]
    pub fn new(action_name: impl Into<String>) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            action_name: action_name.into(),
        }
    }
}

impl Command for DispatchAction {
    fn command_type(&self) -> &'static str {
        "session.dispatch_action"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to restart the adventure from its opening scene.
#[derive(Debug, Clone)]
pub struct ResetAdventure {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ResetAdventure {
    fn command_type(&self) -> &'static str {
        "session.reset_adventure"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to add health to every party member.
#[derive(Debug, Clone)]
pub struct HealFriendlies {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Health added to each party member; must be positive.
    pub amount: i32,
}

impl Command for HealFriendlies {
    fn command_type(&self) -> &'static str {
        "session.heal_friendlies"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to bring an extra enemy into the running encounter.
#[derive(Debug, Clone)]
pub struct SpawnReinforcement {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for SpawnReinforcement {
    fn command_type(&self) -> &'static str {
        "session.spawn_reinforcement"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// An enemy's autonomous turn, queued behind the command that scheduled it.
///
/// Carries enough to detect staleness: a turn scheduled for another
/// encounter, turn number, or actor is skipped.
#[derive(Debug, Clone)]
pub struct EnemyTurn {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Encounter the turn belongs to.
    pub encounter_id: Uuid,
    /// Turn number at scheduling time.
    pub turn_number: u64,
    /// The acting enemy.
    pub enemy: CharacterId,
}

impl Command for EnemyTurn {
    fn command_type(&self) -> &'static str {
        "combat.enemy_turn"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
