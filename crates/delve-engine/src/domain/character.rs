//! Combat participants and the roster that owns them.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Identity of a character. Two characters may share a name, never an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CharacterId(Uuid);

impl CharacterId {
    /// Allocates a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A mutable combat participant.
///
/// Health is not clamped: a hit may leave it negative until the character
/// is removed from combat, and renderers show the exact value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    /// Display name.
    pub name: String,
    /// Which side the character fights on.
    pub is_enemy: bool,
    /// Remaining health; `<= 0` means defeated.
    pub health: i32,
    /// Damage dealt per attack.
    pub attack: i32,
}

impl Character {
    /// Creates a character.
    #[must_use]
    pub fn new(name: impl Into<String>, is_enemy: bool, health: i32, attack: i32) -> Self {
        Self {
            name: name.into(),
            is_enemy,
            health,
            attack,
        }
    }

    /// Creates an enemy.
    #[must_use]
    pub fn enemy(name: impl Into<String>, health: i32, attack: i32) -> Self {
        Self::new(name, true, health, attack)
    }

    /// Creates a member of the player's party.
    #[must_use]
    pub fn friendly(name: impl Into<String>, health: i32, attack: i32) -> Self {
        Self::new(name, false, health, attack)
    }

    /// Whether the character has been beaten.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

/// Id-keyed store of every character that appeared in the adventure.
///
/// Scenes refer to characters by [`CharacterId`]; the roster is the only
/// owner of their mutable stats.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    characters: HashMap<CharacterId, Character>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a character and returns its new id.
    pub fn insert(&mut self, character: Character) -> CharacterId {
        let id = CharacterId::new();
        self.characters.insert(id, character);
        id
    }

    /// Looks up a character.
    #[must_use]
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// Looks up a character for mutation.
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    /// The character's name, or `"Unknown"` for an id the roster never saw.
    #[must_use]
    pub fn name(&self, id: CharacterId) -> &str {
        self.get(id).map_or("Unknown", |c| c.name.as_str())
    }

    /// Whether `id` names a known enemy.
    #[must_use]
    pub fn is_enemy(&self, id: CharacterId) -> bool {
        self.get(id).is_some_and(|c| c.is_enemy)
    }
}
