//! Enumerated session options
//!
//! One configurable surface replacing the original per-variant pages: the
//! practice language, the task context seeding the system prompt, the
//! feedback toggle, and whether input arrives typed or spoken.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Practice language offered by the language picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    German,
    French,
    Spanish,
    English,
}

impl Language {
    /// English display name, as used inside the system prompts.
    pub fn name(&self) -> &'static str {
        match self {
            Language::German => "German",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::English => "English",
        }
    }

    pub const ALL: [Language; 4] = [
        Language::German,
        Language::French,
        Language::Spanish,
        Language::English,
    ];
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Language {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "german" | "de" => Ok(Language::German),
            "french" | "fr" => Ok(Language::French),
            "spanish" | "es" => Ok(Language::Spanish),
            "english" | "en" => Ok(Language::English),
            other => Err(SessionError::UnknownOption(format!("language: {other}"))),
        }
    }
}

/// Task context; each seeds a different system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskContext {
    Vocabulary,
    Grammar,
    Conversation,
}

impl std::fmt::Display for TaskContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskContext::Vocabulary => write!(f, "vocabulary"),
            TaskContext::Grammar => write!(f, "grammar"),
            TaskContext::Conversation => write!(f, "conversation"),
        }
    }
}

impl std::str::FromStr for TaskContext {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vocabulary" | "vocab" => Ok(TaskContext::Vocabulary),
            "grammar" => Ok(TaskContext::Grammar),
            "conversation" | "conversational" | "practice" => Ok(TaskContext::Conversation),
            other => Err(SessionError::UnknownOption(format!("task: {other}"))),
        }
    }
}

/// Whether user input arrives typed or spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    Text,
    Voice,
}

/// The full option set for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    pub language: Language,
    pub task: TaskContext,
    pub feedback_mode: bool,
    pub input_mode: InputMode,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            language: Language::German,
            task: TaskContext::Conversation,
            feedback_mode: false,
            input_mode: InputMode::Text,
        }
    }
}
