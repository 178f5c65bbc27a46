//! Install command: run the full install sequence
//!
//! The operator channel is chosen here. A terminal gets inquire prompts;
//! `--non-interactive`, or stdout not being a terminal, switches to the
//! scripted channel so nothing ever blocks waiting for input.

use std::path::Path;

use tracing::{debug, warn};

use crate::config::InstallerConfig;
use crate::error::Result;
use crate::installer::{InstallOrchestrator, RunOutcome};
use crate::operator::{OperatorChannel, ScriptedChannel, TerminalChannel};
use crate::shell::{BashShell, Shell};
use crate::ui::display;

/// Options shared by every install run
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    pub non_interactive: bool,
    pub assume_yes: bool,
}

/// Run install command
///
/// Configuration errors are returned before anything runs. A run that
/// starts always yields an outcome.
pub fn run(config_path: Option<&Path>, options: InstallOptions) -> Result<RunOutcome> {
    let config = InstallerConfig::load(config_path)?;

    let terminal = TerminalChannel;
    let scripted = ScriptedChannel::new(options.assume_yes);
    let operator: &dyn OperatorChannel = if !options.non_interactive && console::user_attended() {
        &terminal
    } else {
        &scripted
    };

    display::banner();
    Ok(install(&config, &BashShell, operator, options.assume_yes))
}

/// Run the install sequence against `shell` and `operator`.
///
/// An aborted run is reported here and, when a person is answering, held
/// until the operator acknowledges it.
pub fn install(
    config: &InstallerConfig,
    shell: &dyn Shell,
    operator: &dyn OperatorChannel,
    assume_yes: bool,
) -> RunOutcome {
    debug!(
        interactive = operator.is_interactive(),
        assume_yes, "starting install"
    );

    let mut orchestrator = InstallOrchestrator::new(config, shell, operator).assume_yes(assume_yes);
    let outcome = orchestrator.run();
    debug!(
        state = %orchestrator.state(),
        steps = orchestrator.history().len(),
        platform = ?orchestrator.platform(),
        packages = orchestrator.installed().len(),
        "install run finished"
    );

    if let RunOutcome::Aborted { step, cause } = &outcome {
        display::abort(*step, cause);
        if operator.is_interactive() {
            if let Err(e) = operator.acknowledge("press enter to exit") {
                warn!(error = %e, "abort acknowledgment failed");
            }
        }
    }
    outcome
}
