//! Combat orchestration: narrative, pacing, publishing and enemy turns
//! layered over the pure transitions of [`CombatSceneState`].

use std::fmt::Write as _;

use async_trait::async_trait;
use delve_core::error::DomainError;
use delve_core::rng::pick_index;
use tracing::debug;
use uuid::Uuid;

use crate::application::action::{Action, ActionBody, unique_name};
use crate::application::session::Session;
use crate::domain::character::{Character, CharacterId, Roster};
use crate::domain::combat::{AttackOutcome, CombatPhase, CombatSceneState};
use crate::domain::commands::EnemyTurn;
use crate::domain::scene::Scene;

/// Key of the combat scene.
pub const COMBAT_SCENE_KEY: &str = "combat";

/// Selects the `index`-th living enemy as the target.
struct SelectEnemy {
    index: usize,
}

#[async_trait]
impl ActionBody for SelectEnemy {
    async fn run(&self, session: &mut Session) -> Result<(), DomainError> {
        select_enemy(session, self.index)
    }
}

/// Resolves `attacker`'s attack on `target`.
struct Attack {
    attacker: CharacterId,
    target: CharacterId,
}

#[async_trait]
impl ActionBody for Attack {
    async fn run(&self, session: &mut Session) -> Result<(), DomainError> {
        attack(session, self.attacker, self.target).await
    }
}

/// Enters a combat scene against `enemies`, with the adventure's party on
/// the other side.
///
/// # Errors
///
/// Never fails in practice; see [`initialize`].
pub fn start(session: &mut Session, enemies: Vec<Character>) -> Result<(), DomainError> {
    let enemies: Vec<CharacterId> = enemies
        .into_iter()
        .map(|enemy| session.adventure_mut().characters.insert(enemy))
        .collect();
    let friendlies = session.adventure().friendly_characters.clone();

    session.enter_scene(Scene::combat(COMBAT_SCENE_KEY, CombatSceneState::new()));
    initialize(session, &enemies, &friendlies)
}

/// Begins the encounter in the current combat scene, announces the first
/// actor, offers its actions and publishes.
///
/// # Errors
///
/// Returns [`DomainError::NotInCombat`] when no combat scene is on screen.
pub fn initialize(
    session: &mut Session,
    enemies: &[CharacterId],
    friendlies: &[CharacterId],
) -> Result<(), DomainError> {
    let parts = session.combat_parts().ok_or(DomainError::NotInCombat)?;
    parts.state.begin(enemies, friendlies, parts.roster, parts.rng);

    let first = parts
        .state
        .current_turn_character()
        .map_or("Unknown", |id| parts.roster.name(id));
    parts.state.output_text = format!("Combat has begun! {first}'s turn.");

    update_actions(session);
    session.publish();
    Ok(())
}

/// Rebuilds the offered actions for whoever acts now.
///
/// A friendly gets one `Select` action per living enemy, preceded by an
/// `Attack` action once a target is selected. An enemy gets no actions;
/// instead its autonomous turn is queued, at most once per turn and only
/// while a living friendly is left to attack.
pub fn update_actions(session: &mut Session) {
    let Some(parts) = session.combat_parts() else {
        return;
    };
    let state = parts.state;
    let roster = &*parts.roster;

    let mut actions: Vec<Action> = Vec::new();
    let mut follow_up = None;
    match state.phase(roster) {
        CombatPhase::FriendlyTargeted { actor, target } => {
            let name = unique_name(&actions, format!("Attack {}", roster.name(target)));
            actions.push(Action::new(
                name,
                Attack {
                    attacker: actor,
                    target,
                },
            ));
            push_selections(&mut actions, state, roster);
        }
        CombatPhase::FriendlyChoosing { .. } => push_selections(&mut actions, state, roster),
        CombatPhase::EnemyActing { actor } => {
            let turn_number = state.turn_number();
            if state.friendlies(roster).is_empty() {
                debug!(enemy = roster.name(actor), "no friendly left, enemy stays idle");
            } else if state.scheduled_enemy_turn != Some(turn_number) {
                state.scheduled_enemy_turn = Some(turn_number);
                follow_up = Some(EnemyTurn {
                    correlation_id: Uuid::new_v4(),
                    encounter_id: state.encounter_id(),
                    turn_number,
                    enemy: actor,
                });
            }
        }
        CombatPhase::Idle => debug!("turn order is empty, no actions offered"),
    }
    state.actions = actions;

    if let Some(turn) = follow_up {
        session.schedule(turn);
    }
}

fn push_selections(actions: &mut Vec<Action>, state: &CombatSceneState, roster: &Roster) {
    for (index, enemy) in state.enemies(roster).into_iter().enumerate() {
        let name = unique_name(actions, format!("Select {}", roster.name(enemy)));
        actions.push(Action::new(name, SelectEnemy { index }));
    }
}

/// Selects the `index`-th living enemy and publishes. An index outside the
/// enemy list is ignored.
///
/// # Errors
///
/// Returns [`DomainError::NotInCombat`] when no combat scene is on screen.
pub fn select_enemy(session: &mut Session, index: usize) -> Result<(), DomainError> {
    let parts = session.combat_parts().ok_or(DomainError::NotInCombat)?;
    let Some(enemy) = parts.state.select_enemy(index, parts.roster) else {
        return Ok(());
    };
    parts.state.output_text = format!("{} selected as target.", parts.roster.name(enemy));

    update_actions(session);
    session.publish();
    Ok(())
}

/// Resolves a friendly attack, then ends the turn.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] when it is not `attacker`'s turn or
/// `target` already left the fight; nothing is changed in that case.
pub async fn attack(
    session: &mut Session,
    attacker: CharacterId,
    target: CharacterId,
) -> Result<(), DomainError> {
    let parts = session.combat_parts().ok_or(DomainError::NotInCombat)?;
    if parts.state.current_turn_character() != Some(attacker) {
        return Err(DomainError::Validation(format!(
            "it is not {}'s turn",
            parts.roster.name(attacker)
        )));
    }
    let Some(outcome) = parts.state.resolve_attack(attacker, target, parts.roster) else {
        return Err(DomainError::Validation(format!(
            "{} is no longer in the fight",
            parts.roster.name(target)
        )));
    };
    parts.state.output_text = describe(&outcome, parts.roster);

    end_turn(session).await;
    Ok(())
}

fn describe(outcome: &AttackOutcome, roster: &Roster) -> String {
    let target = roster.name(outcome.target);
    let mut text = format!(
        "{} attacks {target} for {} damage!",
        roster.name(outcome.attacker),
        outcome.damage
    );
    if outcome.defeated {
        let _ = write!(text, "\n{target} has been defeated!");
    }
    text
}

/// Ends the current turn.
///
/// When a character was just hit, publishes once for the hit flash, waits
/// out the flash and clears the marker. Then moves to the next actor,
/// announces it, recomputes actions and publishes. No-op while the turn
/// order is empty.
pub async fn end_turn(session: &mut Session) {
    let hit_flash = session.pacing().hit_flash;
    let Some(state) = session.scene().state.as_combat() else {
        return;
    };
    if state.turn_order.is_empty() {
        debug!("turn order is empty, nothing to end");
        return;
    }

    if state.recently_attacked_character.is_some() {
        session.publish();
        tokio::time::sleep(hit_flash).await;
        if let Some(state) = session.scene_mut().state.as_combat_mut() {
            state.recently_attacked_character = None;
        }
    }

    let Some(parts) = session.combat_parts() else {
        return;
    };
    parts.state.advance_to_next_turn();
    let announcement = parts
        .state
        .current_turn_character()
        .map(|next| format!("It's now {}'s turn.", parts.roster.name(next)));
    if let Some(line) = announcement {
        session.scene_mut().state.push_line(&line);
    }

    update_actions(session);
    session.publish();
}

/// Plays a queued enemy turn.
///
/// Turns queued for another encounter, turn or actor are skipped. With no
/// living friendly the turn simply ends. Otherwise the enemy "thinks" for
/// a while, strikes a random living friendly and ends its turn.
pub async fn run_enemy_turn(session: &mut Session, turn: &EnemyTurn) {
    let thinking = session.pacing().enemy_thinking;
    let Some(parts) = session.combat_parts() else {
        debug!("no combat on screen, skipping enemy turn");
        return;
    };
    let state = parts.state;
    if state.encounter_id() != turn.encounter_id
        || state.turn_number() != turn.turn_number
        || state.current_turn_character() != Some(turn.enemy)
    {
        debug!(turn_number = turn.turn_number, "skipping stale enemy turn");
        return;
    }
    state.scheduled_enemy_turn = None;

    if state.friendlies(parts.roster).is_empty() {
        debug!("no friendly left to attack");
        end_turn(session).await;
        return;
    }

    state.show_cursor = true;
    state.output_text = format!("{} is thinking...", parts.roster.name(turn.enemy));
    session.publish();
    tokio::time::sleep(thinking).await;

    let Some(parts) = session.combat_parts() else {
        return;
    };
    parts.state.show_cursor = false;
    let friendlies = parts.state.friendlies(parts.roster);
    let outcome = pick_index(friendlies.len(), parts.rng)
        .and_then(|index| friendlies.get(index).copied())
        .and_then(|target| parts.state.resolve_attack(turn.enemy, target, parts.roster));
    if let Some(outcome) = outcome {
        parts.state.output_text = describe(&outcome, parts.roster);
    }

    end_turn(session).await;
}

/// Brings `enemy` into the running encounter at the end of the turn order.
///
/// # Errors
///
/// Returns [`DomainError::NotInCombat`] when no combat scene is on screen.
pub fn spawn_reinforcement(session: &mut Session, enemy: Character) -> Result<(), DomainError> {
    let parts = session.combat_parts().ok_or(DomainError::NotInCombat)?;
    let line = format!("A new enemy appears: {}!", enemy.name);
    let id = parts.roster.insert(enemy);
    parts.state.add_character(id);
    parts.state.join_turn_order(id);
    session.scene_mut().state.push_line(&line);

    update_actions(session);
    session.publish();
    Ok(())
}
