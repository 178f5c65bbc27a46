//! Operator interaction
//!
//! Questions, confirmations and the abort acknowledgment go through
//! [`OperatorChannel`]. [`TerminalChannel`] asks on the terminal with
//! `inquire`; [`ScriptedChannel`] answers without a terminal so the same
//! install logic runs unattended.

use inquire::{Confirm, Text};
use tracing::debug;

use crate::error::{Result, operator as operator_error};

/// Capability for asking the operator
pub trait OperatorChannel {
    /// Ask for a free-form answer
    fn prompt(&self, question: &str) -> Result<String>;

    /// Ask a yes/no question; `default` is the answer on plain Enter
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;

    /// Show `message` and wait until the operator has seen it
    fn acknowledge(&self, message: &str) -> Result<()>;

    /// Whether a person is answering
    fn is_interactive(&self) -> bool;
}

/// Asks on the controlling terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalChannel;

impl OperatorChannel for TerminalChannel {
    fn prompt(&self, question: &str) -> Result<String> {
        let answer = Text::new(question).prompt()?;
        Ok(answer.trim().to_string())
    }

    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        let help = if default {
            "Press Enter to confirm, or 'n' to decline"
        } else {
            "Press Enter to decline, or 'y' to confirm"
        };
        Confirm::new(question)
            .with_default(default)
            .with_help_message(help)
            .prompt()
            .map_err(|e| operator_error::prompt_failed(format!("failed to read confirmation: {e}")))
    }

    fn acknowledge(&self, message: &str) -> Result<()> {
        Text::new(message).prompt_skippable()?;
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

/// Answers without a terminal.
///
/// Free-form questions cannot be answered and fail. Confirmations take
/// the question's default, or "yes" when `assume_yes` is set.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptedChannel {
    assume_yes: bool,
}

impl ScriptedChannel {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl OperatorChannel for ScriptedChannel {
    fn prompt(&self, question: &str) -> Result<String> {
        Err(operator_error::unavailable(question))
    }

    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        let answer = self.assume_yes || default;
        debug!(question, answer, "answered confirmation without a terminal");
        Ok(answer)
    }

    fn acknowledge(&self, _message: &str) -> Result<()> {
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
