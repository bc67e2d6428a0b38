//! The explicit game session every operation runs against.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use delve_core::rng::DeterministicRng;
use tracing::debug;

use crate::application::action::{Action, find};
use crate::application::bus::StateBus;
use crate::application::render::Renderer;
use crate::domain::adventure::AdventureState;
use crate::domain::character::Roster;
use crate::domain::combat::CombatSceneState;
use crate::domain::commands::EnemyTurn;
use crate::domain::scene::Scene;

/// Delays that shape what viewers see between publications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// How long the hit flash stays on screen before the turn advances.
    pub hit_flash: Duration,
    /// How long an enemy "thinks" before striking.
    pub enemy_thinking: Duration,
}

impl Pacing {
    /// No delays at all.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            hit_flash: Duration::ZERO,
            enemy_thinking: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            hit_flash: Duration::from_millis(600),
            enemy_thinking: Duration::from_secs(2),
        }
    }
}

/// Mutable borrows of the pieces a combat step touches together.
pub(crate) struct CombatParts<'a> {
    pub state: &'a mut CombatSceneState,
    pub roster: &'a mut Roster,
    pub rng: &'a mut (dyn DeterministicRng + Send),
}

/// One game session: the adventure, the current scene and the plumbing
/// needed to render and publish it.
///
/// Owned by a single worker; nothing here is shared between tasks.
pub struct Session {
    adventure: AdventureState,
    scene: Scene,
    parked: HashMap<String, Scene>,
    bus: StateBus,
    renderer: Arc<dyn Renderer>,
    rng: Box<dyn DeterministicRng + Send>,
    pacing: Pacing,
    follow_ups: VecDeque<EnemyTurn>,
}

impl Session {
    /// Creates a session showing `scene`.
    #[must_use]
    pub fn new(
        adventure: AdventureState,
        scene: Scene,
        bus: StateBus,
        renderer: Arc<dyn Renderer>,
        rng: Box<dyn DeterministicRng + Send>,
        pacing: Pacing,
    ) -> Self {
        Self {
            adventure,
            scene,
            parked: HashMap::new(),
            bus,
            renderer,
            rng,
            pacing,
            follow_ups: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn adventure(&self) -> &AdventureState {
        &self.adventure
    }

    pub fn adventure_mut(&mut self) -> &mut AdventureState {
        &mut self.adventure
    }

    /// The scene on screen.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Replaces the current scene. The old one is parked under its key,
    /// untouched, so it can be resumed later.
    pub fn enter_scene(&mut self, scene: Scene) {
        debug!(from = %self.scene.key, to = %scene.key, "entering scene");
        let previous = std::mem::replace(&mut self.scene, scene);
        self.parked.insert(previous.key.clone(), previous);
    }

    /// Brings a parked scene back on screen. Returns `false` when no scene
    /// is parked under `key`.
    pub fn resume_scene(&mut self, key: &str) -> bool {
        match self.parked.remove(key) {
            Some(scene) => {
                self.enter_scene(scene);
                true
            }
            None => false,
        }
    }

    /// Whether a scene is parked under `key`.
    #[must_use]
    pub fn is_parked(&self, key: &str) -> bool {
        self.parked.contains_key(key)
    }

    /// Starts over with a fresh adventure and scene, forgetting parked
    /// scenes and pending follow-ups.
    pub fn reset(&mut self, adventure: AdventureState, scene: Scene) {
        self.adventure = adventure;
        self.scene = scene;
        self.parked.clear();
        self.follow_ups.clear();
    }

    /// Renders the current state.
    #[must_use]
    pub fn render(&self) -> String {
        self.renderer.render(&self.adventure, &self.scene.state)
    }

    /// Renders the current state and publishes it on the bus.
    pub fn publish(&self) {
        let receivers = self.bus.publish(self.render());
        debug!(receivers, scene = %self.scene.key, "published state");
    }

    /// Looks up an offered action: the scene's first, then the adventure's.
    #[must_use]
    pub fn find_action(&self, name: &str) -> Option<Action> {
        find(self.scene.state.actions(), name)
            .or_else(|| find(&self.adventure.actions, name))
            .cloned()
    }

    #[must_use]
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Splits the session into the parts a combat step needs, if a combat
    /// scene is on screen.
    pub(crate) fn combat_parts(&mut self) -> Option<CombatParts<'_>> {
        let state = self.scene.state.as_combat_mut()?;
        Some(CombatParts {
            state,
            roster: &mut self.adventure.characters,
            rng: self.rng.as_mut(),
        })
    }

    /// Queues an enemy turn to run once the current command finishes.
    pub(crate) fn schedule(&mut self, turn: EnemyTurn) {
        debug!(turn_number = turn.turn_number, "scheduling enemy turn");
        self.follow_ups.push_back(turn);
    }

    /// Takes the next queued follow-up.
    pub fn next_follow_up(&mut self) -> Option<EnemyTurn> {
        self.follow_ups.pop_front()
    }

    /// Number of queued follow-ups.
    #[must_use]
    pub fn pending_follow_ups(&self) -> usize {
        self.follow_ups.len()
    }
}
