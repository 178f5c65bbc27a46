//! Display session gate

use tracing::{info, warn};

use crate::error::{Result, platform as platform_error};
use crate::operator::OperatorChannel;
use crate::shell::Shell;

const SESSION_QUERY: &str = "echo $XDG_SESSION_TYPE";

/// Confirms the host runs the required display session protocol
pub struct SessionGuard<'a> {
    shell: &'a dyn Shell,
    operator: &'a dyn OperatorChannel,
}

impl<'a> SessionGuard<'a> {
    pub fn new(shell: &'a dyn Shell, operator: &'a dyn OperatorChannel) -> Self {
        Self { shell, operator }
    }

    /// Fail unless the session type equals `required`.
    ///
    /// If the session cannot be queried, the operator is asked; anything
    /// but an explicit "yes" fails. Returns the accepted session type.
    pub fn verify_session_type(&self, required: &str) -> Result<String> {
        match self.shell.capture(SESSION_QUERY) {
            Ok(output) => {
                let detected = output.unwrap_or_default();
                if detected == required {
                    info!(session = %detected, "display session accepted");
                    Ok(detected)
                } else {
                    Err(platform_error::unsupported_session(required, detected))
                }
            }
            Err(err) => {
                warn!(error = %err, "session query failed, asking the operator");
                if self
                    .operator
                    .confirm(&format!("are you on {required}?"), false)?
                {
                    Ok(required.to_string())
                } else {
                    Err(platform_error::unsupported_session(required, "unknown"))
                }
            }
        }
    }
}
