//! Common test utilities for darth-waydr integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// An isolated home directory for one test run
pub struct TestHome {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path used as HOME and as the root of XDG_CONFIG_HOME
    pub path: PathBuf,
}

impl TestHome {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a configuration file and return its path
    #[allow(dead_code)]
    pub fn write_config(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path.join(name);
        std::fs::write(&path, content).expect("Failed to write config file");
        path
    }

    /// Per-user configuration file picked up without `--config`
    #[allow(dead_code)]
    pub fn write_user_config(&self, content: &str) -> PathBuf {
        let dir = self.path.join(".config").join("darth-waydr");
        std::fs::create_dir_all(&dir).expect("Failed to create config directory");
        let path = dir.join("config.yaml");
        std::fs::write(&path, content).expect("Failed to write config file");
        path
    }

    /// The binary, with HOME and the config directory pointed at this home
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("darth-waydr").expect("binary not built");
        cmd.env("HOME", &self.path)
            .env("XDG_CONFIG_HOME", self.path.join(".config"))
            .env_remove("DARTH_WAYDR_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}
