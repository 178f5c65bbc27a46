//! Operator input errors

use super::WaydrError;

/// Creates an error for a question that cannot be asked without a terminal
pub fn unavailable(question: impl Into<String>) -> WaydrError {
    WaydrError::PromptUnavailable {
        question: question.into(),
    }
}

/// Creates a prompt failure
pub fn prompt_failed(message: impl Into<String>) -> WaydrError {
    WaydrError::PromptFailed {
        message: message.into(),
    }
}
