//! The seam through which an adventure's content plugs into the engine.

use crate::domain::adventure::AdventureState;
use crate::domain::character::Character;
use crate::domain::scene::Scene;

/// Supplies the content of one adventure.
pub trait Script: Send + Sync {
    /// A fresh adventure: the party and the adventure-level actions.
    fn new_adventure(&self) -> AdventureState;

    /// The scene shown when the adventure starts or restarts.
    fn opening_scene(&self) -> Scene;

    /// Template for an enemy joining a running encounter.
    fn reinforcement(&self) -> Character;
}
