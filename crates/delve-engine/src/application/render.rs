//! The seam between session state and its transport representation.

use std::fmt::Write as _;

use crate::domain::adventure::AdventureState;
use crate::domain::scene::SceneState;

/// Turns the current session state into the string published to viewers.
///
/// Implementations must be pure and total: the engine calls them after
/// every mutation and has no way to recover from a failure.
pub trait Renderer: Send + Sync {
    /// Renders `scene` in the context of `adventure`.
    fn render(&self, adventure: &AdventureState, scene: &SceneState) -> String;
}

/// A plain-text renderer for logs, tests and terminals.
///
/// Prints the narrative text, then for combat one line per participant in
/// turn order (`>` marks the actor, `*` the character just hit), then the
/// offered actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl Renderer for PlainTextRenderer {
    fn render(&self, adventure: &AdventureState, scene: &SceneState) -> String {
        let mut out = String::from(scene.output_text());

        if let Some(combat) = scene.as_combat() {
            let current = combat.current_turn_character();
            for id in &combat.turn_order {
                let Some(character) = adventure.characters.get(*id) else {
                    continue;
                };
                let marker = if current == Some(*id) { '>' } else { ' ' };
                let flash = if combat.recently_attacked_character == Some(*id) {
                    " *"
                } else {
                    ""
                };
                let _ = write!(
                    out,
                    "\n{marker} {}: {} HP{flash}",
                    character.name, character.health
                );
            }
        }

        let names: Vec<&str> = scene
            .actions()
            .iter()
            .chain(&adventure.actions)
            .map(crate::application::action::Action::name)
            .collect();
        if !names.is_empty() {
            let _ = write!(out, "\nActions: {}", names.join(" | "));
        }
        if scene.show_cursor() {
            out.push('_');
        }
        out
    }
}
