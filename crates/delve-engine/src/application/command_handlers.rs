//! Command handlers for the session.
//!
//! Each handler runs one command against the session the worker owns:
//! look up what the command targets, apply it, publish the result.

use delve_core::command::Command;
use delve_core::error::DomainError;
use tracing::info;

use crate::application::combat;
use crate::application::script::Script;
use crate::application::session::Session;
use crate::domain::commands::{
    DispatchAction, EnemyTurn, HealFriendlies, ResetAdventure, SpawnReinforcement,
};

/// Handles the `DispatchAction` command: finds the offered action and runs
/// it.
///
/// # Errors
///
/// Returns `DomainError::ActionNotFound` if no action with that name is
/// offered, or the action body's error.
pub async fn handle_dispatch(
    command: &DispatchAction,
    session: &mut Session,
) -> Result<(), DomainError> {
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        action = %command.action_name,
        "handling command"
    );
    let action = session
        .find_action(&command.action_name)
        .ok_or_else(|| DomainError::ActionNotFound(command.action_name.clone()))?;
    action.run(session).await
}

/// Handles the `ResetAdventure` command: restarts from the script's
/// opening scene and publishes.
pub fn handle_reset(command: &ResetAdventure, session: &mut Session, script: &dyn Script) {
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        "handling command"
    );
    session.reset(script.new_adventure(), script.opening_scene());
    session.publish();
}

/// Handles the `HealFriendlies` command: adds health to every party member
/// and publishes.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the amount is not positive.
pub fn handle_heal(command: &HealFriendlies, session: &mut Session) -> Result<(), DomainError> {
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        amount = command.amount,
        "handling command"
    );
    if command.amount <= 0 {
        return Err(DomainError::Validation(format!(
            "heal amount must be positive, got {}",
            command.amount
        )));
    }

    let adventure = session.adventure_mut();
    for id in adventure.friendly_characters.clone() {
        if let Some(character) = adventure.characters.get_mut(id) {
            character.health = character.health.saturating_add(command.amount);
        }
    }
    session.publish();
    Ok(())
}

/// Handles the `SpawnReinforcement` command: adds the script's
/// reinforcement to the running encounter.
///
/// # Errors
///
/// Returns `DomainError::NotInCombat` if no combat scene is on screen.
pub fn handle_spawn_reinforcement(
    command: &SpawnReinforcement,
    session: &mut Session,
    script: &dyn Script,
) -> Result<(), DomainError> {
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        "handling command"
    );
    combat::spawn_reinforcement(session, script.reinforcement())
}

/// Handles an `EnemyTurn` follow-up.
pub async fn handle_enemy_turn(command: &EnemyTurn, session: &mut Session) {
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        turn_number = command.turn_number,
        "handling command"
    );
    combat::run_enemy_turn(session, command).await;
}
