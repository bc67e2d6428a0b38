//! Route modules organized by concern.

pub mod admin;
pub mod game;
pub mod health;
pub mod session;
