//! Shell command execution
//!
//! Every interaction with the host (package manager, network fetches,
//! privileged file writes, environment queries) goes through [`Shell`], so
//! the installer logic can run against a recording double in tests.

use std::borrow::Cow;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::{Result, shell as shell_error};

/// Fixed curl invocation for every download: HTTPS only, TLS 1.2 minimum,
/// fail on HTTP errors and certificate problems.
pub const CURL: &str = "curl --proto '=https' --tlsv1.2 -Sf";

/// Lines of stderr kept in a failure report
const STDERR_TAIL_LINES: usize = 5;

/// A facility that runs command lines on the host
pub trait Shell {
    /// Run `command`.
    ///
    /// With `capture`, standard output is collected, trimmed and returned
    /// (`None` when empty); otherwise output streams to the terminal and
    /// `None` is returned. A nonzero exit is an error.
    fn run(&self, command: &str, capture: bool) -> Result<Option<String>>;

    /// Run `command` and return its trimmed standard output
    fn capture(&self, command: &str) -> Result<Option<String>> {
        self.run(command, true)
    }

    /// Run `command` with output streaming to the terminal
    fn execute(&self, command: &str) -> Result<()> {
        self.run(command, false).map(|_| ())
    }
}

/// Runs commands through `bash -c`
#[derive(Debug, Default, Clone, Copy)]
pub struct BashShell;

impl Shell for BashShell {
    fn run(&self, command: &str, capture: bool) -> Result<Option<String>> {
        debug!(command, capture, "running shell command");

        let mut cmd = Command::new("bash");
        cmd.arg("-c").arg(command).stdin(Stdio::inherit());

        if !capture {
            let status = cmd
                .status()
                .map_err(|e| shell_error::command_failed(command, e.to_string()))?;
            if !status.success() {
                warn!(command, %status, "command failed");
                return Err(shell_error::command_failed(command, status.to_string()));
            }
            return Ok(None);
        }

        let output = cmd
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| shell_error::command_failed(command, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail = stderr_tail(&stderr);
            warn!(command, status = %output.status, "command failed");
            let reason = if tail.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {tail}", output.status)
            };
            return Err(shell_error::command_failed(command, reason));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let trimmed = stdout.trim();
        Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
    }
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.trim().lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join(" / ")
}

/// Quote a single argument for embedding in a bash command line
pub fn quote(argument: &str) -> Result<Cow<'_, str>> {
    shlex::try_quote(argument).map_err(|_| shell_error::unquotable(argument))
}

/// Quote every argument and join them with spaces
pub fn join<'a>(arguments: impl IntoIterator<Item = &'a str>) -> Result<String> {
    let quoted = arguments
        .into_iter()
        .map(quote)
        .collect::<Result<Vec<_>>>()?;
    Ok(quoted.join(" "))
}
