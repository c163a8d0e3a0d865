//! System-prompt seeding
//!
//! Each task context seeds the conversation with its own system prompt; the
//! feedback toggle appends an instruction to explain grammar and vocabulary
//! in every reply.

use crate::options::{Language, TaskContext};

/// System prompt for the given task and language.
pub fn system_prompt(task: TaskContext, language: Language, feedback_mode: bool) -> String {
    let mut prompt = match task {
        TaskContext::Vocabulary => format!(
            "Create a vocabulary quiz in {language} focusing on job interview topics. \
             The quiz should be Fill-in-the-Blanks type and include 10 questions. \
             Provide an answer key."
        ),
        TaskContext::Grammar => format!("Explain the {language} basic grammar concepts."),
        TaskContext::Conversation => {
            format!("Let's role-play in {language}. Please start the conversation.")
        }
    };

    if feedback_mode {
        prompt.push_str(
            " After each of the user's messages, add brief feedback explaining any grammar \
             or vocabulary mistakes they made.",
        );
    }

    prompt
}

/// Assistant notice confirming the selected context.
pub fn context_notice(task: TaskContext) -> &'static str {
    match task {
        TaskContext::Vocabulary => "📘 Context set: Vocabulary practice.",
        TaskContext::Grammar => "✍️ Context set: Grammar practice.",
        TaskContext::Conversation => "💬 Context set: Conversational practice.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_language() {
        for language in Language::ALL {
            let prompt = system_prompt(TaskContext::Conversation, language, false);
            assert!(prompt.contains(language.name()));
        }
    }

    #[test]
    fn test_vocabulary_prompt_shape() {
        let prompt = system_prompt(TaskContext::Vocabulary, Language::French, false);
        assert!(prompt.contains("vocabulary quiz in French"));
        assert!(prompt.contains("10 questions"));
        assert!(prompt.contains("answer key"));
    }

    #[test]
    fn test_feedback_mode_appends_instruction() {
        let plain = system_prompt(TaskContext::Grammar, Language::Spanish, false);
        let with_feedback = system_prompt(TaskContext::Grammar, Language::Spanish, true);
        assert!(with_feedback.starts_with(&plain));
        assert!(with_feedback.contains("feedback"));
    }

    #[test]
    fn test_each_task_has_distinct_notice() {
        let notices = [
            context_notice(TaskContext::Vocabulary),
            context_notice(TaskContext::Grammar),
            context_notice(TaskContext::Conversation),
        ];
        assert_ne!(notices[0], notices[1]);
        assert_ne!(notices[1], notices[2]);
    }
}
