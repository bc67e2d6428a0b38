//! Domain layer for the adventure content.

pub mod cast;
pub mod text;
