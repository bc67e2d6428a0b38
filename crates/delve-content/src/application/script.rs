//! The Dungeon Delve script.

use delve_engine::application::script::Script;
use delve_engine::domain::adventure::AdventureState;
use delve_engine::domain::character::Character;
use delve_engine::domain::scene::{DefaultSceneState, Scene};

use crate::application::narrative;
use crate::domain::cast;
use crate::domain::text::OPENING_SCENE_KEY;

/// The Dungeon Delve adventure: a cave, a desert, a pyramid and its guards.
#[derive(Debug, Clone, Copy, Default)]
pub struct DungeonDelve;

impl Script for DungeonDelve {
    fn new_adventure(&self) -> AdventureState {
        let mut adventure = AdventureState::new();
        for member in cast::party() {
            adventure.recruit(member);
        }
        adventure.actions = vec![narrative::check_party()];
        adventure
    }

    fn opening_scene(&self) -> Scene {
        Scene::narrative(
            OPENING_SCENE_KEY,
            DefaultSceneState::new(String::new(), vec![narrative::start()], false),
        )
    }

    fn reinforcement(&self) -> Character {
        cast::reinforcement()
    }
}
