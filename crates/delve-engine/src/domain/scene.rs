//! Scenes and the state that drives the current screen.

use serde::Serialize;

use crate::application::action::Action;
use crate::domain::combat::CombatSceneState;

/// State of a narrative scene.
#[derive(Debug, Clone, Default)]
pub struct DefaultSceneState {
    /// Narrative text shown to every viewer.
    pub output_text: String,
    /// Actions currently offered.
    pub actions: Vec<Action>,
    /// Whether the blinking cursor is visible.
    pub show_cursor: bool,
}

impl DefaultSceneState {
    /// Creates a narrative state.
    #[must_use]
    pub fn new(output_text: impl Into<String>, actions: Vec<Action>, show_cursor: bool) -> Self {
        Self {
            output_text: output_text.into(),
            actions,
            show_cursor,
        }
    }
}

/// Discriminant of [`SceneState`], used by views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Story text and choices.
    Narrative,
    /// Turn-based combat.
    Combat,
}

/// The state driving the current screen.
#[derive(Debug, Clone)]
pub enum SceneState {
    /// A narrative scene.
    Default(DefaultSceneState),
    /// A combat encounter.
    Combat(CombatSceneState),
}

impl SceneState {
    /// Which kind of scene this is.
    #[must_use]
    pub fn kind(&self) -> SceneKind {
        match self {
            Self::Default(_) => SceneKind::Narrative,
            Self::Combat(_) => SceneKind::Combat,
        }
    }

    #[must_use]
    pub fn output_text(&self) -> &str {
        match self {
            Self::Default(state) => &state.output_text,
            Self::Combat(state) => &state.output_text,
        }
    }

    pub fn set_output_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        match self {
            Self::Default(state) => state.output_text = text,
            Self::Combat(state) => state.output_text = text,
        }
    }

    /// Appends `line` to the narrative on a new line.
    pub fn push_line(&mut self, line: &str) {
        let text = match self {
            Self::Default(state) => &mut state.output_text,
            Self::Combat(state) => &mut state.output_text,
        };
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(line);
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        match self {
            Self::Default(state) => &state.actions,
            Self::Combat(state) => &state.actions,
        }
    }

    pub fn set_actions(&mut self, actions: Vec<Action>) {
        match self {
            Self::Default(state) => state.actions = actions,
            Self::Combat(state) => state.actions = actions,
        }
    }

    #[must_use]
    pub fn show_cursor(&self) -> bool {
        match self {
            Self::Default(state) => state.show_cursor,
            Self::Combat(state) => state.show_cursor,
        }
    }

    pub fn set_show_cursor(&mut self, show: bool) {
        match self {
            Self::Default(state) => state.show_cursor = show,
            Self::Combat(state) => state.show_cursor = show,
        }
    }

    /// The combat state, if this is a combat scene.
    #[must_use]
    pub fn as_combat(&self) -> Option<&CombatSceneState> {
        match self {
            Self::Combat(state) => Some(state),
            Self::Default(_) => None,
        }
    }

    pub fn as_combat_mut(&mut self) -> Option<&mut CombatSceneState> {
        match self {
            Self::Combat(state) => Some(state),
            Self::Default(_) => None,
        }
    }
}

/// A named phase of the session holding exactly one [`SceneState`].
#[derive(Debug, Clone)]
pub struct Scene {
    /// Key used to park and resume the scene.
    pub key: String,
    /// The scene's state.
    pub state: SceneState,
}

impl Scene {
    /// Creates a narrative scene.
    #[must_use]
    pub fn narrative(key: impl Into<String>, state: DefaultSceneState) -> Self {
        Self {
            key: key.into(),
            state: SceneState::Default(state),
        }
    }

    /// Creates a combat scene.
    #[must_use]
    pub fn combat(key: impl Into<String>, state: CombatSceneState) -> Self {
        Self {
            key: key.into(),
            state: SceneState::Combat(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_line_separates_lines() {
        let mut state = SceneState::Default(DefaultSceneState::new("first", Vec::new(), false));

        state.push_line("second");

        assert_eq!(state.output_text(), "first\nsecond");
    }

    #[test]
    fn test_push_line_on_empty_text_has_no_leading_newline() {
        let mut state = SceneState::Default(DefaultSceneState::default());

        state.push_line("only");

        assert_eq!(state.output_text(), "only");
    }

    #[test]
    fn test_accessors_reach_combat_fields() {
        let mut state = SceneState::Combat(CombatSceneState::new());

        state.set_output_text("fight");
        state.set_show_cursor(true);

        assert_eq!(state.kind(), SceneKind::Combat);
        assert_eq!(state.output_text(), "fight");
        assert!(state.show_cursor());
        assert!(state.as_combat().is_some());
    }
}
