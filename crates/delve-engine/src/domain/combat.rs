//! Combat scene state and its synchronous transitions.
//!
//! Everything here is a pure mutation of [`CombatSceneState`] (plus the
//! roster for damage). Narrative text, delays, rendering and enemy-turn
//! scheduling live in `application::combat`.

use delve_core::rng::{DeterministicRng, shuffle};
use tracing::debug;
use uuid::Uuid;

use crate::application::action::Action;
use crate::domain::character::{CharacterId, Roster};

/// Whose turn it is and what they may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    /// A friendly acts and has not picked a target yet.
    FriendlyChoosing {
        /// The acting character.
        actor: CharacterId,
    },
    /// A friendly acts and has a living enemy selected.
    FriendlyTargeted {
        /// The acting character.
        actor: CharacterId,
        /// The selected enemy.
        target: CharacterId,
    },
    /// An enemy acts on its own.
    EnemyActing {
        /// The acting character.
        actor: CharacterId,
    },
    /// Nobody is left in the turn order.
    Idle,
}

/// Result of one resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    pub attacker: CharacterId,
    pub target: CharacterId,
    pub damage: i32,
    /// Health after the hit, possibly negative.
    pub remaining_health: i32,
    /// The target dropped to `<= 0` and was removed from combat.
    pub defeated: bool,
}

/// State of a combat encounter.
///
/// `turn_order` is a permutation of the living `characters`, fixed when the
/// encounter begins and only shrunk by removal (reinforcements append).
/// `selected_enemy_index` indexes the enemy view returned by
/// [`CombatSceneState::enemies`], not `characters`.
#[derive(Debug, Clone, Default)]
pub struct CombatSceneState {
    pub output_text: String,
    pub actions: Vec<Action>,
    pub show_cursor: bool,
    /// Every participant still in the fight.
    pub characters: Vec<CharacterId>,
    pub selected_enemy_index: Option<usize>,
    pub turn_order: Vec<CharacterId>,
    /// Only meaningful while `turn_order` is non-empty.
    pub current_turn_index: usize,
    /// Hit-flash marker for the renderer, cleared after one broadcast.
    pub recently_attacked_character: Option<CharacterId>,
    encounter_id: Uuid,
    turn_number: u64,
    pub(crate) scheduled_enemy_turn: Option<u64>,
}

impl CombatSceneState {
    /// Creates an empty encounter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            encounter_id: Uuid::new_v4(),
            ..Self::default()
        }
    }

    /// Identifies this encounter; changes on every [`begin`](Self::begin).
    #[must_use]
    pub fn encounter_id(&self) -> Uuid {
        self.encounter_id
    }

    /// Number of turns ended since the encounter began.
    #[must_use]
    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    /// Starts a new encounter: merges both sides and shuffles the turn
    /// order. Characters already defeated do not join.
    pub fn begin(
        &mut self,
        enemies: &[CharacterId],
        friendlies: &[CharacterId],
        roster: &Roster,
        rng: &mut dyn DeterministicRng,
    ) {
        debug!(
            enemies = enemies.len(),
            friendlies = friendlies.len(),
            "beginning encounter"
        );
        self.characters.clear();
        self.characters.extend(
            enemies
                .iter()
                .chain(friendlies)
                .copied()
                .filter(|id| roster.get(*id).is_some_and(|c| !c.is_defeated())),
        );

        self.turn_order = self.characters.clone();
        shuffle(&mut self.turn_order, rng);
        self.current_turn_index = 0;
        self.selected_enemy_index = None;
        self.recently_attacked_character = None;
        self.encounter_id = Uuid::new_v4();
        self.turn_number = 0;
        self.scheduled_enemy_turn = None;
        debug!(size = self.turn_order.len(), "turn order initialized");
    }

    /// Enemies still in the fight, in `characters` order.
    #[must_use]
    pub fn enemies(&self, roster: &Roster) -> Vec<CharacterId> {
        self.characters
            .iter()
            .copied()
            .filter(|id| roster.is_enemy(*id))
            .collect()
    }

    /// Friendlies still in the fight, in `characters` order.
    #[must_use]
    pub fn friendlies(&self, roster: &Roster) -> Vec<CharacterId> {
        self.characters
            .iter()
            .copied()
            .filter(|id| roster.get(*id).is_some_and(|c| !c.is_enemy))
            .collect()
    }

    /// Adds a participant to the fight without giving it a turn.
    pub fn add_character(&mut self, id: CharacterId) {
        self.characters.push(id);
    }

    /// Appends a participant to the end of the turn order.
    pub fn join_turn_order(&mut self, id: CharacterId) {
        if !self.turn_order.contains(&id) {
            self.turn_order.push(id);
        }
    }

    /// Removes a participant from `characters` and `turn_order`.
    ///
    /// The acting character stays current when an earlier entry is removed;
    /// the index wraps to 0 when it falls off the end. Removing an enemy
    /// invalidates the selection, since the enemy view shifts.
    pub fn remove_character(&mut self, id: CharacterId, roster: &Roster) {
        debug!(character = roster.name(id), "removing character");
        self.characters.retain(|c| *c != id);

        if let Some(position) = self.turn_order.iter().position(|c| *c == id) {
            self.turn_order.remove(position);
            if position < self.current_turn_index {
                self.current_turn_index -= 1;
            }
        }

        if self.current_turn_index >= self.turn_order.len() {
            self.current_turn_index = 0;
        }

        if roster.is_enemy(id) {
            self.selected_enemy_index = None;
        }
    }

    /// The enemy behind `selected_enemy_index`, if it is still in range.
    #[must_use]
    pub fn selected_enemy(&self, roster: &Roster) -> Option<CharacterId> {
        let index = self.selected_enemy_index?;
        self.enemies(roster).get(index).copied()
    }

    /// The character whose turn it is.
    #[must_use]
    pub fn current_turn_character(&self) -> Option<CharacterId> {
        self.turn_order.get(self.current_turn_index).copied()
    }

    /// Moves the turn to the next character. No-op on an empty order.
    pub fn advance_to_next_turn(&mut self) {
        if self.turn_order.is_empty() {
            debug!("cannot advance turn, turn order is empty");
            return;
        }
        self.current_turn_index = (self.current_turn_index + 1) % self.turn_order.len();
        self.turn_number += 1;
        debug!(index = self.current_turn_index, "advanced to next turn");
    }

    /// Selects the `index`-th living enemy. Out-of-range indices are ignored.
    pub fn select_enemy(&mut self, index: usize, roster: &Roster) -> Option<CharacterId> {
        let enemy = self.enemies(roster).get(index).copied();
        match enemy {
            Some(_) => self.selected_enemy_index = Some(index),
            None => debug!(index, "ignoring selection outside the enemy list"),
        }
        enemy
    }

    /// Applies `attacker`'s attack to `target`.
    ///
    /// Marks the target for the hit flash, removes it when defeated and
    /// clears the selection. Returns `None` when either side is unknown or
    /// the target already left the fight.
    pub fn resolve_attack(
        &mut self,
        attacker: CharacterId,
        target: CharacterId,
        roster: &mut Roster,
    ) -> Option<AttackOutcome> {
        if !self.characters.contains(&target) {
            return None;
        }
        let damage = roster.get(attacker)?.attack;
        let victim = roster.get_mut(target)?;
        victim.health -= damage;
        let remaining_health = victim.health;
        let defeated = victim.is_defeated();

        self.recently_attacked_character = Some(target);
        if defeated {
            self.remove_character(target, roster);
        }
        self.selected_enemy_index = None;

        Some(AttackOutcome {
            attacker,
            target,
            damage,
            remaining_health,
            defeated,
        })
    }

    /// Current phase of the turn state machine.
    #[must_use]
    pub fn phase(&self, roster: &Roster) -> CombatPhase {
        let Some(actor) = self.current_turn_character() else {
            return CombatPhase::Idle;
        };
        if roster.is_enemy(actor) {
            return CombatPhase::EnemyActing { actor };
        }
        match self.selected_enemy(roster) {
            Some(target) => CombatPhase::FriendlyTargeted { actor, target },
            None => CombatPhase::FriendlyChoosing { actor },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::character::Character;
    use delve_test_support::{MockRng, SequenceRng};

    struct Fixture {
        roster: Roster,
        goblin: CharacterId,
        orc: CharacterId,
        hero: CharacterId,
        companion: CharacterId,
    }

    fn fixture() -> Fixture {
        let mut roster = Roster::new();
        let goblin = roster.insert(Character::enemy("Goblin", 30, 5));
        let orc = roster.insert(Character::enemy("Orc", 50, 8));
        let hero = roster.insert(Character::friendly("Hero", 100, 10));
        let companion = roster.insert(Character::friendly("Companion", 75, 7));
        Fixture {
            roster,
            goblin,
            orc,
            hero,
            companion,
        }
    }

    /// Turn order equals insertion order: Goblin, Orc, Hero, Companion.
    fn begun(f: &Fixture) -> CombatSceneState {
        let mut state = CombatSceneState::new();
        state.begin(
            &[f.goblin, f.orc],
            &[f.hero, f.companion],
            &f.roster,
            &mut MockRng,
        );
        state
    }

    #[test]
    fn test_begin_puts_every_living_participant_in_turn_order_once() {
        let f = fixture();
        let mut state = CombatSceneState::new();

        state.begin(
            &[f.goblin, f.orc],
            &[f.hero, f.companion],
            &f.roster,
            &mut SequenceRng::new(vec![1, 0, 1]),
        );

        assert_eq!(state.characters.len(), 4);
        assert_eq!(state.turn_order.len(), 4);
        for id in [f.goblin, f.orc, f.hero, f.companion] {
            assert_eq!(state.turn_order.iter().filter(|c| **c == id).count(), 1);
        }
        assert_eq!(state.current_turn_index, 0);
        assert!(state.current_turn_character().is_some());
    }

    #[test]
    fn test_begin_skips_defeated_characters() {
        let mut f = fixture();
        f.roster.get_mut(f.companion).unwrap().health = 0;
        let mut state = CombatSceneState::new();

        state.begin(
            &[f.goblin, f.orc],
            &[f.hero, f.companion],
            &f.roster,
            &mut MockRng,
        );

        assert_eq!(state.turn_order.len(), 3);
        assert!(!state.characters.contains(&f.companion));
    }

    #[test]
    fn test_begin_changes_encounter_id() {
        let f = fixture();
        let mut state = CombatSceneState::new();
        let before = state.encounter_id();

        state.begin(&[f.goblin], &[f.hero], &f.roster, &mut MockRng);

        assert_ne!(state.encounter_id(), before);
    }

    #[test]
    fn test_advancing_turn_order_size_times_returns_to_start() {
        let f = fixture();
        let mut state = begun(&f);
        let first = state.current_turn_character();

        for _ in 0..state.turn_order.len() {
            state.advance_to_next_turn();
        }

        assert_eq!(state.current_turn_index, 0);
        assert_eq!(state.current_turn_character(), first);
        assert_eq!(state.turn_number(), 4);
    }

    #[test]
    fn test_advance_on_empty_turn_order_is_noop() {
        let mut state = CombatSceneState::new();

        state.advance_to_next_turn();

        assert_eq!(state.current_turn_index, 0);
        assert_eq!(state.current_turn_character(), None);
        assert_eq!(state.turn_number(), 0);
    }

    #[test]
    fn test_select_enemy_out_of_range_is_ignored() {
        let f = fixture();
        let mut state = begun(&f);

        assert_eq!(state.select_enemy(2, &f.roster), None);
        assert_eq!(state.selected_enemy_index, None);

        assert_eq!(state.select_enemy(1, &f.roster), Some(f.orc));
        assert_eq!(state.selected_enemy_index, Some(1));
    }

    #[test]
    fn test_phase_follows_current_actor_and_selection() {
        let f = fixture();
        let mut state = begun(&f);

        assert_eq!(
            state.phase(&f.roster),
            CombatPhase::EnemyActing { actor: f.goblin }
        );

        state.current_turn_index = 2;
        assert_eq!(
            state.phase(&f.roster),
            CombatPhase::FriendlyChoosing { actor: f.hero }
        );

        state.select_enemy(0, &f.roster);
        assert_eq!(
            state.phase(&f.roster),
            CombatPhase::FriendlyTargeted {
                actor: f.hero,
                target: f.goblin
            }
        );

        assert_eq!(CombatSceneState::new().phase(&f.roster), CombatPhase::Idle);
    }

    #[test]
    fn test_resolve_attack_subtracts_attack_and_clears_selection() {
        let mut f = fixture();
        let mut state = begun(&f);
        state.select_enemy(0, &f.roster);

        let outcome = state
            .resolve_attack(f.hero, f.goblin, &mut f.roster)
            .unwrap();

        assert_eq!(outcome.damage, 10);
        assert_eq!(outcome.remaining_health, 20);
        assert!(!outcome.defeated);
        assert_eq!(f.roster.get(f.goblin).unwrap().health, 20);
        assert_eq!(state.recently_attacked_character, Some(f.goblin));
        assert_eq!(state.selected_enemy_index, None);
    }

    #[test]
    fn test_resolve_attack_removes_defeated_target_and_keeps_negative_health() {
        let mut f = fixture();
        let mut state = begun(&f);
        f.roster.get_mut(f.goblin).unwrap().health = 5;

        let outcome = state
            .resolve_attack(f.hero, f.goblin, &mut f.roster)
            .unwrap();

        assert!(outcome.defeated);
        assert_eq!(outcome.remaining_health, -5);
        assert_eq!(f.roster.get(f.goblin).unwrap().health, -5);
        assert!(!state.characters.contains(&f.goblin));
        assert!(!state.turn_order.contains(&f.goblin));
        assert_eq!(state.turn_order.len(), 3);
    }

    #[test]
    fn test_resolve_attack_on_removed_target_is_rejected() {
        let mut f = fixture();
        let mut state = begun(&f);
        state.remove_character(f.goblin, &f.roster);

        assert_eq!(state.resolve_attack(f.hero, f.goblin, &mut f.roster), None);
        assert_eq!(f.roster.get(f.goblin).unwrap().health, 30);
    }

    #[test]
    fn test_removing_earlier_entry_keeps_current_actor() {
        let f = fixture();
        let mut state = begun(&f);
        state.current_turn_index = 3;

        state.remove_character(f.goblin, &f.roster);

        assert_eq!(state.current_turn_character(), Some(f.companion));
        assert_eq!(state.current_turn_index, 2);
    }

    #[test]
    fn test_removing_current_last_entry_wraps_index() {
        let f = fixture();
        let mut state = begun(&f);
        state.current_turn_index = 3;

        state.remove_character(f.companion, &f.roster);

        assert_eq!(state.current_turn_index, 0);
        assert_eq!(state.current_turn_character(), Some(f.goblin));
    }

    #[test]
    fn test_removing_everyone_leaves_idle_state() {
        let f = fixture();
        let mut state = begun(&f);

        for id in [f.goblin, f.orc, f.hero, f.companion] {
            state.remove_character(id, &f.roster);
        }

        assert!(state.turn_order.is_empty());
        assert_eq!(state.current_turn_character(), None);
        assert_eq!(state.phase(&f.roster), CombatPhase::Idle);
    }

    #[test]
    fn test_removing_enemy_clears_selection() {
        let f = fixture();
        let mut state = begun(&f);
        state.select_enemy(1, &f.roster);

        state.remove_character(f.goblin, &f.roster);

        assert_eq!(state.selected_enemy_index, None);
        assert_eq!(state.enemies(&f.roster), vec![f.orc]);
    }

    #[test]
    fn test_removing_friendly_keeps_selection() {
        let f = fixture();
        let mut state = begun(&f);
        state.select_enemy(1, &f.roster);

        state.remove_character(f.companion, &f.roster);

        assert_eq!(state.selected_enemy(&f.roster), Some(f.orc));
    }

    #[test]
    fn test_join_turn_order_appends_once() {
        let mut f = fixture();
        let mut state = begun(&f);
        let reinforcement = f.roster.insert(Character::enemy("Goblin Reinforcement", 30, 5));

        state.add_character(reinforcement);
        state.join_turn_order(reinforcement);
        state.join_turn_order(reinforcement);

        assert_eq!(state.turn_order.len(), 5);
        assert_eq!(state.turn_order.last(), Some(&reinforcement));
        assert_eq!(state.enemies(&f.roster).len(), 3);
    }
}
