//! Host platform model
//!
//! A [`Platform`] is built once per run by [`probe::PlatformProbe`] and
//! [`session::SessionGuard`], then passed by reference to everything that
//! depends on the CPU architecture or distribution codename.

pub mod probe;
pub mod session;


use std::fmt;

use serde::Serialize;

use crate::error::{Result, platform as platform_error};

/// Machine identifiers reported by 64-bit ARM hosts
pub const ARM64_CPUS: &[&str] = &["armv8l", "aarch64", "arm64"];

/// Machine identifiers reported by 64-bit x86 hosts
pub const AMD64_CPUS: &[&str] = &["x86_64", "x86-64", "x64", "amd64"];

/// Normalized CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    Arm64,
    Amd64,
}

impl Architecture {
    /// Canonical token, as it appears in package file names
    pub fn as_str(self) -> &'static str {
        match self {
            Architecture::Arm64 => "arm64",
            Architecture::Amd64 => "amd64",
        }
    }

    /// Map a raw machine identifier (e.g. `uname -m` output)
    pub fn from_machine(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if ARM64_CPUS.contains(&raw) {
            Some(Architecture::Arm64)
        } else if AMD64_CPUS.contains(&raw) {
            Some(Architecture::Amd64)
        } else {
            None
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a raw machine identifier, failing for anything outside the
/// two supported sets.
pub fn normalize_architecture(raw: &str) -> Result<Architecture> {
    Architecture::from_machine(raw)
        .ok_or_else(|| platform_error::unsupported("cpu type", raw.trim(), supported_cpus()))
}

/// Both supported machine identifier sets, for operator messages
pub fn supported_cpus() -> String {
    format!("[{}], [{}]", ARM64_CPUS.join(", "), AMD64_CPUS.join(", "))
}

/// Check a distribution codename against the allow-list
pub fn validate_distro(raw: &str, supported: &[String]) -> Result<String> {
    let codename = raw.trim();
    if supported.iter().any(|d| d == codename) {
        Ok(codename.to_string())
    } else {
        Err(platform_error::unsupported(
            "distribution codename",
            codename,
            format!("[{}]", supported.join(", ")),
        ))
    }
}

/// Validated host description, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Platform {
    pub architecture: Architecture,
    pub distro: String,
    pub session: String,
}

impl Platform {
    pub fn new(
        architecture: Architecture,
        distro: impl Into<String>,
        session: impl Into<String>,
    ) -> Self {
        Self {
            architecture,
            distro: distro.into(),
            session: session.into(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.architecture, self.distro, self.session)
    }
}
