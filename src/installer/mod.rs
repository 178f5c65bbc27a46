//! Install orchestration
//!
//! The installer is a fixed sequence of steps run strictly in order:
//!
//! 1. Prerequisites: cpu architecture, distribution codename, display session
//! 2. Base dependencies through the package manager
//! 3. Repository registration and metadata refresh
//! 4. Architecture-matching packages from the repository listing
//! 5. The application package and its one-time initialization
//! 6. Convenience aliases in the shell startup file
//!
//! The first failure of a mandatory step aborts the run. Nothing already
//! applied is rolled back; every step is safe to repeat, so the remedy for
//! an aborted run is to run it again. Alias setup is the only step whose
//! failure is reported and then ignored.

pub mod aliases;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::InstallerConfig;
use crate::error::{Result, WaydrError};
use crate::operator::OperatorChannel;
use crate::package_manager::PackageManager;
use crate::platform::Platform;
use crate::platform::probe::PlatformProbe;
use crate::platform::session::SessionGuard;
use crate::repository::selection::PackageSelector;
use crate::repository::{Repository, listing, local_file_name, path_arg};
use crate::shell::{self, Shell};
use crate::ui::display;

/// Where the install run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    Idle,
    CheckingPrerequisites,
    InstallingDependencies,
    ConfiguringRepository,
    InstallingRepoPackages,
    InstallingApplication,
    ConfiguringAliases,
    Completed,
    Aborted,
}

impl InstallState {
    /// Section title shown to the operator
    pub fn title(self) -> &'static str {
        match self {
            InstallState::Idle => "Starting",
            InstallState::CheckingPrerequisites => "Prerequisites",
            InstallState::InstallingDependencies => "Dependencies",
            InstallState::ConfiguringRepository => "Unified install",
            InstallState::InstallingRepoPackages => "Repo packages install",
            InstallState::InstallingApplication => "Desktop install",
            InstallState::ConfiguringAliases => "Create aliases",
            InstallState::Completed => "Completed",
            InstallState::Aborted => "Aborted",
        }
    }

    /// No transition leaves a terminal state
    pub fn is_terminal(self) -> bool {
        matches!(self, InstallState::Completed | InstallState::Aborted)
    }
}

impl fmt::Display for InstallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One entry of the install sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallStep {
    pub state: InstallState,
    /// A failure of this step ends the run
    pub abort_on_failure: bool,
}

impl InstallStep {
    const fn mandatory(state: InstallState) -> Self {
        Self {
            state,
            abort_on_failure: true,
        }
    }
}

/// The install sequence, in execution order
pub const STEPS: [InstallStep; 6] = [
    InstallStep::mandatory(InstallState::CheckingPrerequisites),
    InstallStep::mandatory(InstallState::InstallingDependencies),
    InstallStep::mandatory(InstallState::ConfiguringRepository),
    InstallStep::mandatory(InstallState::InstallingRepoPackages),
    InstallStep::mandatory(InstallState::InstallingApplication),
    InstallStep {
        state: InstallState::ConfiguringAliases,
        abort_on_failure: false,
    },
];

/// How an install run ended
#[derive(Debug)]
pub enum RunOutcome {
    Completed,
    Aborted {
        step: InstallState,
        cause: WaydrError,
    },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }

    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }
}

/// Drives the install sequence against the host collaborators
pub struct InstallOrchestrator<'a> {
    config: &'a InstallerConfig,
    shell: &'a dyn Shell,
    operator: &'a dyn OperatorChannel,
    assume_yes: bool,
    state: InstallState,
    history: Vec<InstallState>,
    platform: Option<Platform>,
    installed: Vec<PathBuf>,
}

impl<'a> InstallOrchestrator<'a> {
    pub fn new(
        config: &'a InstallerConfig,
        shell: &'a dyn Shell,
        operator: &'a dyn OperatorChannel,
    ) -> Self {
        Self {
            config,
            shell,
            operator,
            assume_yes: false,
            state: InstallState::Idle,
            history: vec![InstallState::Idle],
            platform: None,
            installed: Vec::new(),
        }
    }

    /// Pass `-y` to the package manager so it never asks
    #[must_use]
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn state(&self) -> InstallState {
        self.state
    }

    /// Every state entered so far, starting with [`InstallState::Idle`]
    pub fn history(&self) -> &[InstallState] {
        &self.history
    }

    /// Platform validated by the prerequisite step, once it has passed
    pub fn platform(&self) -> Option<&Platform> {
        self.platform.as_ref()
    }

    /// Package files downloaded and installed by the repository sweep
    pub fn installed(&self) -> &[PathBuf] {
        &self.installed
    }

    /// Run the whole sequence to completion or to the first mandatory failure
    pub fn run(&mut self) -> RunOutcome {
        let first = STEPS[0];
        self.enter(first.state);
        let platform = match self.check_prerequisites() {
            Ok(platform) => platform,
            Err(cause) => return self.abort(first.state, cause),
        };
        display::platform(&platform);
        self.platform = Some(platform.clone());

        for step in &STEPS[1..] {
            self.enter(step.state);
            if let Err(cause) = self.execute(step.state, &platform) {
                if step.abort_on_failure {
                    return self.abort(step.state, cause);
                }
                warn!(step = %step.state, error = %cause, "optional step failed");
                display::warning(&format!("failed to create aliases: {cause}"));
            }
        }

        self.transition(InstallState::Completed);
        display::success(&self.config.application);
        RunOutcome::Completed
    }

    fn execute(&mut self, state: InstallState, platform: &Platform) -> Result<()> {
        match state {
            InstallState::InstallingDependencies => self.install_dependencies(),
            InstallState::ConfiguringRepository => self.configure_repository(platform),
            InstallState::InstallingRepoPackages => self.install_repo_packages(platform),
            InstallState::InstallingApplication => self.install_application(),
            InstallState::ConfiguringAliases => self.configure_aliases(),
            _ => Ok(()),
        }
    }

    fn enter(&mut self, state: InstallState) {
        self.transition(state);
        display::section(state.title());
    }

    fn transition(&mut self, next: InstallState) {
        debug_assert!(
            !self.state.is_terminal(),
            "transition out of terminal state {}",
            self.state
        );
        info!(from = %self.state, to = %next, "install state transition");
        self.state = next;
        self.history.push(next);
    }

    fn abort(&mut self, step: InstallState, cause: WaydrError) -> RunOutcome {
        warn!(step = %step, error = %cause, "install aborted");
        self.transition(InstallState::Aborted);
        RunOutcome::Aborted { step, cause }
    }

    fn package_manager(&self) -> PackageManager<'a> {
        PackageManager::new(self.shell, self.assume_yes)
    }

    fn check_prerequisites(&self) -> Result<Platform> {
        let probe = PlatformProbe::new(self.shell, self.operator);
        let architecture = probe.detect_architecture()?;
        let distro = probe.detect_distro(&self.config.supported_distros)?;
        let session = SessionGuard::new(self.shell, self.operator)
            .verify_session_type(&self.config.required_session)?;
        Ok(Platform::new(architecture, distro, session))
    }

    fn install_dependencies(&self) -> Result<()> {
        if self.config.dependencies.is_empty() {
            debug!("no base dependencies configured");
            return Ok(());
        }
        let pm = self.package_manager();
        display::command(&pm.install_command(&self.config.dependencies)?);
        pm.install(&self.config.dependencies)
    }

    fn configure_repository(&self, platform: &Platform) -> Result<()> {
        Repository::new(&self.config.repository, self.shell).register(&platform.distro)?;
        self.package_manager().update()
    }

    fn install_repo_packages(&mut self, platform: &Platform) -> Result<()> {
        let config = self.config;
        let repo = Repository::new(&config.repository, self.shell);
        let listing_url = repo.listing_url(&platform.distro);

        let html = repo.fetch_listing(&platform.distro)?;
        let listed = listing::list_packages(&html);
        let selected =
            PackageSelector::new(&config.application).select(&listed, platform.architecture);
        info!(
            listed = listed.len(),
            selected = selected.len(),
            url = %listing_url,
            "selected repository packages"
        );
        if selected.is_empty() {
            warn!(url = %listing_url, "no repository packages match this platform");
            display::note(&format!(
                "no {} packages listed at {listing_url}",
                platform.architecture
            ));
            return Ok(());
        }

        let directory = config.download_root()?.join(&platform.distro);
        let make_directory = format!("mkdir -p {}", shell::quote(&path_arg(&directory)?)?);
        let pm = self.package_manager();
        let total = selected.len();

        for (index, href) in selected.iter().enumerate() {
            display::package(local_file_name(href).unwrap_or(href.as_str()), index + 1, total);
            self.shell.execute(&make_directory)?;
            let file = repo.download(&listing_url, href, &directory)?;
            pm.install_local(&file)?;
            self.installed.push(file);
        }
        Ok(())
    }

    fn install_application(&self) -> Result<()> {
        let application = std::slice::from_ref(&self.config.application);
        let pm = self.package_manager();
        display::command(&pm.install_command(application)?);
        pm.install(application)?;
        pm.initialize(&self.config.application)
    }

    fn configure_aliases(&self) -> Result<()> {
        if self.config.aliases.is_empty() {
            debug!("no aliases configured");
            return Ok(());
        }

        display::aliases(&self.config.aliases);
        if !self.operator.confirm("create these aliases?", true)? {
            display::note("skipping alias creation");
            return Ok(());
        }

        let rc_file = self.config.shell_rc_path()?;
        let added = aliases::append_missing(&rc_file, &self.config.aliases)?;
        if added == 0 {
            display::note("aliases already present");
        } else {
            display::note("created aliases");
            display::note("restart shell/terminal if you cannot access aliases");
        }
        Ok(())
    }
}
