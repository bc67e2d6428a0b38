//! Dungeon Delve — scene, action and turn engine.
//!
//! Owns the single game session: the narrative and combat scenes, the
//! actions offered to players, the turn-based combat state machine with its
//! autonomous enemy turns, and the bus that broadcasts every re-rendered
//! snapshot to connected viewers.

pub mod application;
pub mod domain;
