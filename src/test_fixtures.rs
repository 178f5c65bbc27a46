//! Test doubles for the host-facing collaborators.
//!
//! [`FakeShell`] records every command line and answers from a list of
//! substring rules; [`ScriptedOperator`] answers questions from queues.
//! Together they let the installer run end to end without touching the
//! host.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{FakeShell, ScriptedOperator};
//!
//! let shell = FakeShell::new()
//!     .respond("uname -m", "aarch64")
//!     .fail("apt-get -q update");
//! let operator = ScriptedOperator::new().confirms([true]);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::error::{Result, operator as operator_error, shell as shell_error};
use crate::operator::OperatorChannel;
use crate::shell::Shell;

#[derive(Debug, Clone)]
enum Reply {
    Output(Option<String>),
    Fail,
}

/// Shell double: the first rule whose pattern occurs in the command line
/// decides the reply; unmatched commands succeed with no output.
#[derive(Debug, Default)]
pub struct FakeShell {
    rules: Vec<(String, Reply)>,
    log: RefCell<Vec<String>>,
}

impl FakeShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shell double that reports an arm64 focal wayland host
    pub fn arm64_focal() -> Self {
        Self::new()
            .respond("uname -m", "aarch64")
            .respond("lsb_release -sc", "focal")
            .respond("echo $XDG_SESSION_TYPE", "wayland")
    }

    /// Answer commands containing `pattern` with `output`
    #[must_use]
    pub fn respond(mut self, pattern: &str, output: &str) -> Self {
        let output = (!output.is_empty()).then(|| output.to_string());
        self.rules.push((pattern.to_string(), Reply::Output(output)));
        self
    }

    /// Fail commands containing `pattern`
    #[must_use]
    pub fn fail(mut self, pattern: &str) -> Self {
        self.rules.push((pattern.to_string(), Reply::Fail));
        self
    }

    /// Every command line run so far, in order
    pub fn commands(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Whether any command line contained `needle`
    pub fn ran(&self, needle: &str) -> bool {
        self.log.borrow().iter().any(|c| c.contains(needle))
    }

    /// Number of command lines containing `needle`
    pub fn count(&self, needle: &str) -> usize {
        self.log.borrow().iter().filter(|c| c.contains(needle)).count()
    }
}

impl Shell for FakeShell {
    fn run(&self, command: &str, capture: bool) -> Result<Option<String>> {
        self.log.borrow_mut().push(command.to_string());

        let reply = self
            .rules
            .iter()
            .find(|(pattern, _)| command.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Fail) => Err(shell_error::command_failed(command, "exit status: 1")),
            Some(Reply::Output(output)) if capture => Ok(output),
            _ => Ok(None),
        }
    }
}

/// Operator double answering from queues
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    answers: RefCell<VecDeque<String>>,
    confirmations: RefCell<VecDeque<bool>>,
    questions: RefCell<Vec<String>>,
    acknowledged: Cell<usize>,
}

impl ScriptedOperator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue free-form answers
    #[must_use]
    pub fn answers<'a>(self, answers: impl IntoIterator<Item = &'a str>) -> Self {
        self.answers
            .borrow_mut()
            .extend(answers.into_iter().map(str::to_string));
        self
    }

    /// Queue yes/no answers
    #[must_use]
    pub fn confirms(self, confirmations: impl IntoIterator<Item = bool>) -> Self {
        self.confirmations.borrow_mut().extend(confirmations);
        self
    }

    /// Every question asked so far
    pub fn questions(&self) -> Vec<String> {
        self.questions.borrow().clone()
    }

    /// How many times the operator acknowledged a message
    pub fn acknowledged(&self) -> usize {
        self.acknowledged.get()
    }
}

impl OperatorChannel for ScriptedOperator {
    fn prompt(&self, question: &str) -> Result<String> {
        self.questions.borrow_mut().push(question.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| operator_error::unavailable(question))
    }

    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        self.questions.borrow_mut().push(question.to_string());
        Ok(self.confirmations.borrow_mut().pop_front().unwrap_or(default))
    }

    fn acknowledge(&self, _message: &str) -> Result<()> {
        self.acknowledged.set(self.acknowledged.get() + 1);
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
