//! Parlo Session
//!
//! The explicit session object for one practice run: enumerated options
//! (language, task context, feedback toggle, input mode), system-prompt
//! seeding, role-tagged message history, and the append-only interaction
//! log with CSV export. State lives in memory only; a restart starts fresh.

pub mod error;
pub mod log;
pub mod message;
pub mod options;
pub mod prompt;

pub use error::{Result, SessionError};
pub use log::{LogEntry, Session};
pub use message::{ChatMessage, Role};
pub use options::{InputMode, Language, SessionOptions, TaskContext};
pub use prompt::{context_notice, system_prompt};
