//! Application layer for the adventure content.

pub mod narrative;
pub mod script;
