//! Query handlers for the session.
//!
//! Read-only views of the session for JSON consumers.

use serde::Serialize;

use crate::application::session::Session;
use crate::domain::character::{CharacterId, Roster};
use crate::domain::scene::SceneKind;

/// Read-only view of one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterView {
    /// The character identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Which side the character fights on.
    pub is_enemy: bool,
    /// Remaining health, possibly negative.
    pub health: i32,
    /// Damage per attack.
    pub attack: i32,
}

/// Read-only view of a running encounter.
#[derive(Debug, Clone, Serialize)]
pub struct CombatView {
    /// Every participant still in the fight.
    pub characters: Vec<CharacterView>,
    /// Participant ids in turn order.
    pub turn_order: Vec<CharacterId>,
    pub current_turn_index: usize,
    /// The acting character, if any.
    pub current_turn: Option<CharacterId>,
    pub selected_enemy_index: Option<usize>,
    pub recently_attacked_character: Option<CharacterId>,
    /// Turns ended so far.
    pub turn_number: u64,
}

/// Read-only view of the whole session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Key of the scene on screen.
    pub scene: String,
    /// Narrative or combat.
    pub kind: SceneKind,
    /// Narrative text.
    pub output_text: String,
    /// Names of the scene's offered actions.
    pub actions: Vec<String>,
    /// Names of the adventure-level actions.
    pub adventure_actions: Vec<String>,
    pub show_cursor: bool,
    /// The party, in party order.
    pub party: Vec<CharacterView>,
    /// Present while a combat scene is on screen.
    pub combat: Option<CombatView>,
}

fn view(roster: &Roster, id: CharacterId) -> Option<CharacterView> {
    roster.get(id).map(|c| CharacterView {
        id,
        name: c.name.clone(),
        is_enemy: c.is_enemy,
        health: c.health,
        attack: c.attack,
    })
}

/// Builds a snapshot of the session.
#[must_use]
pub fn snapshot(session: &Session) -> SessionSnapshot {
    let adventure = session.adventure();
    let roster = &adventure.characters;
    let state = &session.scene().state;

    let combat = state.as_combat().map(|combat| CombatView {
        characters: combat
            .characters
            .iter()
            .filter_map(|id| view(roster, *id))
            .collect(),
        turn_order: combat.turn_order.clone(),
        current_turn_index: combat.current_turn_index,
        current_turn: combat.current_turn_character(),
        selected_enemy_index: combat.selected_enemy_index,
        recently_attacked_character: combat.recently_attacked_character,
        turn_number: combat.turn_number(),
    });

    SessionSnapshot {
        scene: session.scene().key.clone(),
        kind: state.kind(),
        output_text: state.output_text().to_owned(),
        actions: state.actions().iter().map(|a| a.name().to_owned()).collect(),
        adventure_actions: adventure
            .actions
            .iter()
            .map(|a| a.name().to_owned())
            .collect(),
        show_cursor: state.show_cursor(),
        party: adventure
            .friendly_characters
            .iter()
            .filter_map(|id| view(roster, *id))
            .collect(),
        combat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::application::bus::StateBus;
    use crate::application::combat;
    use crate::application::render::PlainTextRenderer;
    use crate::application::session::Pacing;
    use crate::domain::adventure::AdventureState;
    use crate::domain::character::Character;
    use crate::domain::scene::{DefaultSceneState, Scene};
    use delve_test_support::MockRng;

    fn session() -> Session {
        let mut adventure = AdventureState::new();
        adventure.recruit(Character::friendly("Hero", 100, 10));
        Session::new(
            adventure,
            Scene::narrative("opening", DefaultSceneState::new("Hello", Vec::new(), true)),
            StateBus::new(8),
            Arc::new(PlainTextRenderer),
            Box::new(MockRng),
            Pacing::instant(),
        )
    }

    #[test]
    fn test_narrative_snapshot_has_no_combat() {
        let session = session();

        let snapshot = snapshot(&session);

        assert_eq!(snapshot.scene, "opening");
        assert_eq!(snapshot.kind, SceneKind::Narrative);
        assert!(snapshot.show_cursor);
        assert_eq!(snapshot.party.len(), 1);
        assert!(snapshot.combat.is_none());

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["kind"], "narrative");
        assert_eq!(json["party"][0]["name"], "Hero");
    }

    #[test]
    fn test_combat_snapshot_lists_turn_order() {
        let mut session = session();
        combat::start(&mut session, vec![Character::enemy("Goblin", 30, 5)]).unwrap();

        let snapshot = snapshot(&session);

        let combat = snapshot.combat.unwrap();
        assert_eq!(snapshot.kind, SceneKind::Combat);
        assert_eq!(combat.turn_order.len(), 2);
        assert_eq!(combat.current_turn, Some(combat.turn_order[0]));
        assert_eq!(combat.characters[0].name, "Goblin");
        assert_eq!(combat.turn_number, 0);
    }
}
