//! Error types and handling for Darth Waydr
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostic codes.
//!
//! This module is organized into sub-modules by error domain:
//! - [`platform`]: Unsupported CPU, distribution or session
//! - [`shell`]: Shell, network and package manager failures
//! - [`fs`]: File system errors
//! - [`config`]: Configuration errors
//! - [`operator`]: Prompt and confirmation errors

pub mod config;
pub mod fs;
pub mod operator;
pub mod platform;
pub mod shell;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Darth Waydr operations
#[derive(Error, Diagnostic, Debug)]
pub enum WaydrError {
    // Platform errors
    #[error("unsupported {what}: {value:?}")]
    #[diagnostic(
        code(darth_waydr::platform::unsupported),
        help("supported {what}s: {supported}")
    )]
    UnsupportedPlatform {
        what: String,
        value: String,
        supported: String,
    },

    #[error("only {required} is supported (detected session: {detected:?})")]
    #[diagnostic(
        code(darth_waydr::platform::unsupported_session),
        help("log in to a {required} session and run the installer again")
    )]
    UnsupportedSession { required: String, detected: String },

    // Collaborator errors
    #[error("command failed: {command}: {reason}")]
    #[diagnostic(
        code(darth_waydr::shell::collaborator_failure),
        help("fix the problem above and run the installer again; completed steps are safe to repeat")
    )]
    CollaboratorFailure { command: String, reason: String },

    // File system errors
    #[error("file system error at {path}: {reason}")]
    #[diagnostic(code(darth_waydr::fs::failure))]
    FilesystemFailure { path: String, reason: String },

    // Configuration errors
    #[error("configuration file not found: {path}")]
    #[diagnostic(
        code(darth_waydr::config::not_found),
        help("pass an existing file with --config, or omit it to use built-in defaults")
    )]
    ConfigNotFound { path: String },

    #[error("failed to parse configuration file {path}: {reason}")]
    #[diagnostic(code(darth_waydr::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("invalid configuration: {message}")]
    #[diagnostic(code(darth_waydr::config::invalid))]
    ConfigInvalid { message: String },

    // Operator errors
    #[error("failed to read operator input: {message}")]
    #[diagnostic(code(darth_waydr::operator::prompt_failed))]
    PromptFailed { message: String },

    #[error("operator input required in non-interactive mode: {question}")]
    #[diagnostic(
        code(darth_waydr::operator::unavailable),
        help("run the installer from a terminal, or pass --yes to accept confirmations")
    )]
    PromptUnavailable { question: String },
}

impl WaydrError {
    /// Whether this failure was detected before any host mutation could happen
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            WaydrError::UnsupportedPlatform { .. } | WaydrError::UnsupportedSession { .. }
        )
    }
}

impl From<std::io::Error> for WaydrError {
    fn from(err: std::io::Error) -> Self {
        WaydrError::FilesystemFailure {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for WaydrError {
    fn from(err: serde_yaml::Error) -> Self {
        WaydrError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for WaydrError {
    fn from(err: serde_json::Error) -> Self {
        WaydrError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for WaydrError {
    fn from(err: inquire::InquireError) -> Self {
        WaydrError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, WaydrError>;
