//! Session orchestration: actions, rendering, the state bus, combat turns
//! and the single-flight worker that serializes every mutation.

pub mod action;
pub mod bus;
pub mod combat;
pub mod command_handlers;
pub mod query_handlers;
pub mod render;
pub mod script;
pub mod session;
pub mod worker;
