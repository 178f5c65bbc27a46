//! Installer configuration (config.yaml) data structures
//!
//! Every field defaults to the stock Waydroid values, so a run
//! without a configuration file behaves exactly like the stock installer.
//! The CPU architecture sets are fixed and not part of the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, WaydrError, config as config_error};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV: &str = "DARTH_WAYDR_CONFIG";

const CONFIG_DIR_NAME: &str = "darth-waydr";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Installer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerConfig {
    /// Distribution codenames the repository publishes packages for
    pub supported_distros: Vec<String>,

    /// Display session protocol the application needs
    pub required_session: String,

    /// Base dependencies installed before the repository is registered
    pub dependencies: Vec<String>,

    /// Package repository location and trust material
    pub repository: RepositoryConfig,

    /// Primary application package, installed by its own step
    pub application: String,

    /// Root directory for downloaded packages (default: ~/Downloads/darth_waydr)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,

    /// Shell startup file receiving aliases (default: ~/.bashrc)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_rc: Option<PathBuf>,

    /// Convenience alias definitions offered at the end of the run
    pub aliases: Vec<String>,
}

/// Package repository settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Repository root, used for the source list entry
    pub base_url: String,

    /// Signing key download location
    pub key_url: String,

    /// Where the signing key is installed
    pub keyring_path: PathBuf,

    /// Where the source list entry is written
    pub source_list_path: PathBuf,

    /// Path segment owning the per-distro package listings
    pub packages_owner: String,

    /// Repository component named in the source list entry
    pub component: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://repo.waydro.id".to_string(),
            key_url: "https://repo.waydro.id/waydroid.gpg".to_string(),
            keyring_path: PathBuf::from("/usr/share/keyrings/waydroid.gpg"),
            source_list_path: PathBuf::from("/etc/apt/sources.list.d/waydroid.list"),
            packages_owner: "erfan".to_string(),
            component: "main".to_string(),
        }
    }
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            supported_distros: vec![
                "focal".to_string(),
                "bullseye".to_string(),
                "hirsute".to_string(),
            ],
            required_session: "wayland".to_string(),
            dependencies: vec![
                "python3".to_string(),
                "curl".to_string(),
                "lxc".to_string(),
            ],
            repository: RepositoryConfig::default(),
            application: "waydroid".to_string(),
            download_dir: None,
            shell_rc: None,
            aliases: vec![
                "alias waydroid-stop='sudo waydroid session stop && sudo waydroid container stop'"
                    .to_string(),
                "alias waydroid-start='waydroid-stop 2>/dev/null && sudo systemctl start waydroid-container && waydroid session start'"
                    .to_string(),
                "alias waydroid-start-full='waydroid-stop 2>/dev/null && sudo systemctl start waydroid-container && waydroid show-full-ui'"
                    .to_string(),
            ],
        }
    }
}

impl InstallerConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Serialize configuration to pretty JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load the effective configuration.
    ///
    /// An explicit path must exist. Without one, the per-user file under the
    /// platform config directory is used when present, built-in defaults
    /// otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path),
                None => {
                    debug!("no configuration file found, using built-in defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Read and parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(config_error::not_found(path.display().to_string()));
        }
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| config_error::parse_failed(path.display().to_string(), e.to_string()))?;
        debug!(path = %path.display(), "loading configuration");

        Self::from_yaml(&yaml).map_err(|err| match err {
            WaydrError::ConfigParseFailed { reason, .. } => {
                config_error::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    /// Reject configurations the installer cannot act on
    pub fn validate(&self) -> Result<()> {
        if self.supported_distros.is_empty() {
            return Err(config_error::invalid(
                "supported_distros must list at least one codename",
            ));
        }
        if let Some(blank) = self.supported_distros.iter().find(|d| d.trim().is_empty()) {
            return Err(config_error::invalid(format!(
                "supported_distros contains a blank entry: {blank:?}"
            )));
        }
        if self.application.trim().is_empty() {
            return Err(config_error::invalid("application must not be empty"));
        }
        if self.required_session.trim().is_empty() {
            return Err(config_error::invalid("required_session must not be empty"));
        }
        for (field, url) in [
            ("repository.base_url", &self.repository.base_url),
            ("repository.key_url", &self.repository.key_url),
        ] {
            if !url.starts_with("https://") {
                return Err(config_error::invalid(format!(
                    "{field} must be an https:// URL, got {url:?}"
                )));
            }
        }
        Ok(())
    }

    /// Download root, resolved against the operator's home directory
    pub fn download_root(&self) -> Result<PathBuf> {
        match &self.download_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(home_dir()?.join("Downloads").join("darth_waydr")),
        }
    }

    /// Shell startup file, resolved against the operator's home directory
    pub fn shell_rc_path(&self) -> Result<PathBuf> {
        match &self.shell_rc {
            Some(path) => Ok(path.clone()),
            None => Ok(home_dir()?.join(".bashrc")),
        }
    }
}

/// Per-user configuration file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| config_error::invalid("cannot determine home directory"))
}
