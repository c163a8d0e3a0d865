//! Session state and the interaction log
//!
//! The explicit session object the interaction handler threads through every
//! turn: seeded message history, append-only log of completed interactions,
//! and CSV export. Nothing persists across process restarts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::message::ChatMessage;
use crate::options::{SessionOptions, TaskContext};
use crate::prompt::{context_notice, system_prompt};

/// One completed interaction. Appended once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub language: String,
    pub user: String,
    pub assistant: String,
    pub feedback_mode: bool,
}

/// Per-session state: options, seeded history, append-only log.
#[derive(Debug, Clone)]
pub struct Session {
    options: SessionOptions,
    history: Vec<ChatMessage>,
    log: Vec<LogEntry>,
}

impl Session {
    /// Create a session with its history seeded for the selected task.
    pub fn new(options: SessionOptions) -> Self {
        let mut session = Self {
            options,
            history: Vec::new(),
            log: Vec::new(),
        };
        session.seed_history();
        session
    }

    fn seed_history(&mut self) {
        self.history = vec![
            ChatMessage::system(system_prompt(
                self.options.task,
                self.options.language,
                self.options.feedback_mode,
            )),
            ChatMessage::assistant(context_notice(self.options.task)),
        ];
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Ordered role-tagged history, ready for the chat collaborator.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Switch task context, reseeding the history.
    ///
    /// The log is untouched; only the conversation restarts.
    pub fn set_task(&mut self, task: TaskContext) {
        self.options.task = task;
        self.seed_history();
        info!(task = %task, "context set");
    }

    pub fn push_user<S: Into<String>>(&mut self, content: S) {
        self.history.push(ChatMessage::user(content));
    }

    pub fn push_assistant<S: Into<String>>(&mut self, content: S) {
        self.history.push(ChatMessage::assistant(content));
    }

    /// Append one completed interaction to the log.
    pub fn record<U: Into<String>, A: Into<String>>(&mut self, user: U, assistant: A) {
        self.log.push(LogEntry {
            timestamp: Utc::now(),
            language: self.options.language.name().to_string(),
            user: user.into(),
            assistant: assistant.into(),
            feedback_mode: self.options.feedback_mode,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.log
    }

    /// Drop the log and restart the conversation from its seed.
    pub fn clear(&mut self) {
        self.log.clear();
        self.seed_history();
    }

    /// Export the log as CSV.
    ///
    /// Columns: Timestamp, Language, User, Assistant, FeedbackMode. Fields
    /// are quoted per RFC 4180 when they contain separators.
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "Timestamp,Language,User,Assistant,FeedbackMode")?;
        for entry in &self.log {
            writeln!(
                writer,
                "{},{},{},{},{}",
                csv_field(&entry.timestamp.to_rfc3339()),
                csv_field(&entry.language),
                csv_field(&entry.user),
                csv_field(&entry.assistant),
                entry.feedback_mode
            )?;
        }
        writer.flush()?;

        info!(
            path = %path.as_ref().display(),
            entries = self.log.len(),
            "exported session log"
        );

        Ok(())
    }
}

/// Quote a CSV field when it contains a comma, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;
    use crate::options::{InputMode, Language};

    fn test_session() -> Session {
        Session::new(SessionOptions {
            language: Language::French,
            task: TaskContext::Conversation,
            feedback_mode: false,
            input_mode: InputMode::Text,
        })
    }

    #[test]
    fn test_new_session_is_seeded() {
        let session = test_session();
        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::System);
        assert!(history[0].content.contains("French"));
        assert_eq!(history[1].role, Role::Assistant);
        assert!(session.entries().is_empty());
    }

    #[test]
    fn test_record_appends_entry() {
        let mut session = test_session();
        session.record("Bonjour", "Bonjour! Comment ça va?");

        let entries = session.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user, "Bonjour");
        assert_eq!(entries[0].assistant, "Bonjour! Comment ça va?");
        assert_eq!(entries[0].language, "French");
        assert!(!entries[0].feedback_mode);
    }

    #[test]
    fn test_set_task_reseeds_but_keeps_log() {
        let mut session = test_session();
        session.push_user("hello");
        session.record("hello", "salut");

        session.set_task(TaskContext::Vocabulary);
        assert_eq!(session.history().len(), 2);
        assert!(session.history()[0].content.contains("vocabulary quiz"));
        assert_eq!(session.entries().len(), 1);
    }

    #[test]
    fn test_clear_drops_log_and_reseeds() {
        let mut session = test_session();
        session.push_user("hello");
        session.record("hello", "salut");

        session.clear();
        assert!(session.entries().is_empty());
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_csv_export_quotes_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");

        let mut session = test_session();
        session.record("a, plain comma", "a \"quoted\" reply\nwith a newline");
        session.export_csv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Timestamp,Language,User,Assistant,FeedbackMode"
        );
        assert!(contents.contains("\"a, plain comma\""));
        assert!(contents.contains("\"a \"\"quoted\"\" reply"));
        assert!(contents.trim_end().ends_with("false"));
    }

    #[test]
    fn test_csv_plain_fields_unquoted() {
        assert_eq!(csv_field("hallo"), "hallo");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
    }
}
