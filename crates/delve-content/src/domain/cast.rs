//! Characters appearing in the adventure.

use delve_engine::domain::character::Character;

/// The player's party, in party order.
#[must_use]
pub fn party() -> Vec<Character> {
    vec![
        Character::friendly("Hero", 100, 10),
        Character::friendly("Companion", 75, 7),
    ]
}

/// Enemies met at the pyramid gate.
#[must_use]
pub fn gate_guards() -> Vec<Character> {
    vec![
        Character::enemy("Goblin", 30, 5),
        Character::enemy("Orc", 50, 8),
    ]
}

/// An enemy joining a running fight.
#[must_use]
pub fn reinforcement() -> Character {
    Character::enemy("Goblin Reinforcement", 30, 5)
}
