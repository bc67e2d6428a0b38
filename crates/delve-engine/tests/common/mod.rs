//! Shared test helpers for engine integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use delve_core::rng::DeterministicRng;
use delve_engine::application::action::Action;
use delve_engine::application::bus::StateBus;
use delve_engine::application::combat;
use delve_engine::application::render::PlainTextRenderer;
use delve_engine::application::script::Script;
use delve_engine::application::session::{Pacing, Session};
use delve_engine::domain::adventure::AdventureState;
use delve_engine::domain::character::{Character, CharacterId};
use delve_engine::domain::scene::{DefaultSceneState, Scene};

/// A two-step adventure: a single `Fight` action leading into combat
/// against a Goblin and an Orc.
pub struct TestScript;

impl Script for TestScript {
    fn new_adventure(&self) -> AdventureState {
        let mut adventure = AdventureState::new();
        adventure.recruit(Character::friendly("Hero", 100, 10));
        adventure.recruit(Character::friendly("Companion", 75, 7));
        adventure
    }

    fn opening_scene(&self) -> Scene {
        Scene::narrative(
            "opening",
            DefaultSceneState::new(
                "A cave.",
                vec![Action::from_fn("Fight", |session: &mut Session| {
                    combat::start(session, default_enemies())
                })],
                false,
            ),
        )
    }

    fn reinforcement(&self) -> Character {
        Character::enemy("Goblin Reinforcement", 30, 5)
    }
}

pub fn default_enemies() -> Vec<Character> {
    vec![
        Character::enemy("Goblin", 30, 5),
        Character::enemy("Orc", 50, 8),
    ]
}

/// A session for [`TestScript`] with no delays.
pub fn session(bus: &StateBus, rng: impl DeterministicRng + Send + 'static) -> Session {
    Session::new(
        TestScript.new_adventure(),
        TestScript.opening_scene(),
        bus.clone(),
        Arc::new(PlainTextRenderer),
        Box::new(rng),
        Pacing::instant(),
    )
}

/// Looks up a character by name in the session roster.
pub fn id_of(session: &Session, name: &str) -> CharacterId {
    let combat = session.scene().state.as_combat();
    let roster = &session.adventure().characters;
    combat
        .into_iter()
        .flat_map(|c| c.characters.iter().copied())
        .chain(session.adventure().friendly_characters.iter().copied())
        .find(|id| roster.name(*id) == name)
        .unwrap_or_else(|| panic!("no character named {name}"))
}

pub fn health_of(session: &Session, name: &str) -> i32 {
    let id = id_of(session, name);
    session.adventure().characters.get(id).unwrap().health
}

pub fn current_actor(session: &Session) -> String {
    let combat = session.scene().state.as_combat().unwrap();
    let id = combat.current_turn_character().unwrap();
    session.adventure().characters.name(id).to_owned()
}

pub fn turn_order_names(session: &Session) -> Vec<String> {
    let combat = session.scene().state.as_combat().unwrap();
    combat
        .turn_order
        .iter()
        .map(|id| session.adventure().characters.name(*id).to_owned())
        .collect()
}

pub fn action_names(session: &Session) -> Vec<String> {
    session
        .scene()
        .state
        .actions()
        .iter()
        .map(|a| a.name().to_owned())
        .collect()
}

/// Runs the offered action with the given name.
pub async fn run(session: &mut Session, name: &str) {
    let action = session
        .find_action(name)
        .unwrap_or_else(|| panic!("action {name} not offered"));
    action.run(session).await.unwrap();
}

/// Drains everything currently buffered on a subscription.
pub fn drain(subscription: &mut delve_engine::application::bus::Subscription) -> Vec<String> {
    std::iter::from_fn(|| subscription.try_recv()).collect()
}
