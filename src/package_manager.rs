//! apt/dpkg command templates
//!
//! The system package manager is only ever reached through the shell.

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::repository::path_arg;
use crate::shell::{self, Shell};

/// The host package manager (apt-get and dpkg)
pub struct PackageManager<'a> {
    shell: &'a dyn Shell,
    assume_yes: bool,
}

impl<'a> PackageManager<'a> {
    /// With `assume_yes`, apt-get runs with `-y` and never asks
    pub fn new(shell: &'a dyn Shell, assume_yes: bool) -> Self {
        Self { shell, assume_yes }
    }

    fn yes_flag(&self) -> &'static str {
        if self.assume_yes { " -y" } else { "" }
    }

    /// `apt-get install` command line for `packages`
    pub fn install_command(&self, packages: &[String]) -> Result<String> {
        Ok(format!(
            "sudo apt-get install -q{} {}",
            self.yes_flag(),
            shell::join(packages.iter().map(String::as_str))?
        ))
    }

    /// Install packages from the configured repositories
    pub fn install(&self, packages: &[String]) -> Result<()> {
        let command = self.install_command(packages)?;
        self.shell.execute(&command)?;
        info!(?packages, "installed packages");
        Ok(())
    }

    /// Refresh package metadata
    pub fn update(&self) -> Result<()> {
        self.shell.execute("sudo apt-get -q update")
    }

    /// Install a downloaded package file, resolving missing dependencies
    /// with a fix-broken install when the direct install fails.
    pub fn install_local(&self, package: &Path) -> Result<()> {
        let command = format!(
            "sudo dpkg -i {} || sudo apt-get install -f{}",
            shell::quote(&path_arg(package)?)?,
            self.yes_flag()
        );
        self.shell.execute(&command)?;
        info!(package = %package.display(), "installed package file");
        Ok(())
    }

    /// Run the application's one-time initialization
    pub fn initialize(&self, application: &str) -> Result<()> {
        self.shell
            .execute(&format!("sudo {} init", shell::quote(application)?))
    }
}
