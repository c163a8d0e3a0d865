//! Parlo shell internals
//!
//! Configuration and the consolidated interaction handler, exposed as a
//! library so integration tests can drive turns against stubbed
//! collaborators.

pub mod config;
pub mod interaction;

pub use config::AppConfig;
pub use interaction::{InteractionHandler, TurnOutcome};
