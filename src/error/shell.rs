//! Shell and collaborator errors

use super::WaydrError;

/// Creates a collaborator failure for a command line
pub fn command_failed(command: impl Into<String>, reason: impl Into<String>) -> WaydrError {
    WaydrError::CollaboratorFailure {
        command: command.into(),
        reason: reason.into(),
    }
}

/// Creates a collaborator failure for an argument that cannot be quoted
pub fn unquotable(argument: &str) -> WaydrError {
    WaydrError::CollaboratorFailure {
        command: argument.escape_debug().to_string(),
        reason: "argument cannot be quoted for the shell".to_string(),
    }
}
