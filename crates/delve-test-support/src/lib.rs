//! Shared test doubles for the Dungeon Delve engine.

mod rng;

pub use rng::{MockRng, SequenceRng};
