//! Dungeon Delve — adventure content.
//!
//! The party, the opening narrative and the first encounter of the
//! "Dungeon Delve" adventure, exposed to the engine as a `Script`.

pub mod application;
pub mod domain;

pub use application::script::DungeonDelve;
