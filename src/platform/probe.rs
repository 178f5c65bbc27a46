//! CPU architecture and distribution detection
//!
//! Both values are queried through the shell. When the query itself fails
//! the operator is asked instead, and the answer goes through the same
//! validation as the detected value.

use tracing::{info, warn};

use super::{Architecture, normalize_architecture, validate_distro};
use crate::error::Result;
use crate::operator::OperatorChannel;
use crate::shell::Shell;

const MACHINE_QUERY: &str = "uname -m";
const CODENAME_QUERY: &str = "lsb_release -sc";

/// Detects the host CPU architecture and distribution codename
pub struct PlatformProbe<'a> {
    shell: &'a dyn Shell,
    operator: &'a dyn OperatorChannel,
}

impl<'a> PlatformProbe<'a> {
    pub fn new(shell: &'a dyn Shell, operator: &'a dyn OperatorChannel) -> Self {
        Self { shell, operator }
    }

    /// Detect and normalize the CPU architecture
    pub fn detect_architecture(&self) -> Result<Architecture> {
        let raw = self.query_or_ask(MACHINE_QUERY, "please enter your cpu type:")?;
        let architecture = normalize_architecture(&raw)?;
        info!(raw = %raw, %architecture, "detected cpu architecture");
        Ok(architecture)
    }

    /// Detect the distribution codename and check it against `supported`
    pub fn detect_distro(&self, supported: &[String]) -> Result<String> {
        let raw = self.query_or_ask(CODENAME_QUERY, "please enter your distribution codename:")?;
        let codename = validate_distro(&raw, supported)?;
        info!(codename = %codename, "detected distribution");
        Ok(codename)
    }

    fn query_or_ask(&self, query: &str, question: &str) -> Result<String> {
        match self.shell.capture(query) {
            Ok(output) => Ok(output.unwrap_or_default()),
            Err(err) => {
                warn!(query, error = %err, "platform query failed, asking the operator");
                self.operator.prompt(question)
            }
        }
    }
}
