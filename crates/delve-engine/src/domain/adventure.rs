//! Session-scoped state that outlives any single scene.

use crate::application::action::Action;
use crate::domain::character::{Character, CharacterId, Roster};

/// The adventure: the party, every known character, and actions that stay
/// available whatever scene is on screen.
#[derive(Debug, Clone, Default)]
pub struct AdventureState {
    /// Adventure-level actions, offered after the scene's own.
    pub actions: Vec<Action>,
    /// The player's side, in party order. Combat never shrinks this list.
    pub friendly_characters: Vec<CharacterId>,
    /// Owner of every character's stats.
    pub characters: Roster,
}

impl AdventureState {
    /// Creates an adventure with no party.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a character to the roster and the party.
    pub fn recruit(&mut self, character: Character) -> CharacterId {
        let id = self.characters.insert(character);
        self.friendly_characters.push(id);
        id
    }

    /// Party members with their stats, in party order.
    pub fn party(&self) -> impl Iterator<Item = (CharacterId, &Character)> + '_ {
        self.friendly_characters
            .iter()
            .filter_map(|id| self.characters.get(*id).map(|c| (*id, c)))
    }

    /// One line per party member, e.g. `Hero: 100 HP`.
    #[must_use]
    pub fn party_summary(&self) -> String {
        self.party()
            .map(|(_, c)| format!("{}: {} HP", c.name, c.health))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
