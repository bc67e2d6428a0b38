//! Actions of the opening scene.
//!
//! Each step replaces the offered actions with the next one, so the
//! narrative only moves forward.

use delve_core::error::DomainError;
use delve_engine::application::action::Action;
use delve_engine::application::combat;
use delve_engine::application::session::Session;
use tracing::debug;

use crate::domain::cast;
use crate::domain::text::{APPROACH, AWAKENING, CHECK_PARTY, ENTER_COMBAT, HALT, START};

/// Wakes the party up in the cave.
#[must_use]
pub fn start() -> Action {
    Action::from_fn(START, |session: &mut Session| {
        debug!("the party awakens");
        let state = &mut session.scene_mut().state;
        state.set_output_text(AWAKENING);
        state.set_show_cursor(true);
        state.set_actions(vec![approach()]);
        Ok(())
    })
}

/// Walks up to the pyramid gate.
#[must_use]
pub fn approach() -> Action {
    Action::from_fn(APPROACH, |session: &mut Session| {
        let state = &mut session.scene_mut().state;
        state.set_output_text(HALT);
        state.set_actions(vec![enter_combat()]);
        Ok(())
    })
}

/// Fights the gate guards.
#[must_use]
pub fn enter_combat() -> Action {
    Action::from_fn(ENTER_COMBAT, |session: &mut Session| {
        combat::start(session, cast::gate_guards())
    })
}

/// Appends the party's health to the narrative. Offered in every scene.
#[must_use]
pub fn check_party() -> Action {
    Action::from_fn(CHECK_PARTY, |session: &mut Session| {
        let summary = session.adventure().party_summary();
        if summary.is_empty() {
            return Err(DomainError::Validation("the party is empty".to_owned()));
        }
        session.scene_mut().state.push_line(&summary);
        Ok(())
    })
}
