//! Session state model: characters, scenes, the adventure and combat.

pub mod adventure;
pub mod character;
pub mod combat;
pub mod commands;
pub mod scene;
