//! Delve Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the engine,
//! the content and the HTTP surface depend on. It contains no game rules.

pub mod command;
pub mod error;
pub mod rng;
