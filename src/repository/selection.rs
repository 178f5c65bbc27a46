//! Architecture-based package selection
//!
//! Selection is a pure function of the listing and the architecture.
//! Rules, applied to each file name in listing order:
//!
//! 1. Names containing the application token are skipped; the application
//!    has its own install step.
//! 2. Names containing the architecture token are kept.
//! 3. On arm64 only, names carrying the `all` marker are kept as well.

use tracing::debug;

use crate::platform::Architecture;

/// Marker carried by architecture-independent package names
pub const ALL_ARCH_MARKER: &str = "all";

/// Token excluded from the repository sweep by default
pub const DEFAULT_EXCLUDED: &str = "waydroid";

/// One listed file name, classified against an architecture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCandidate {
    pub filename: String,
    pub is_architecture_match: bool,
    pub is_all_arch_marker: bool,
    pub is_excluded: bool,
}

impl PackageCandidate {
    pub fn classify(filename: &str, arch: Architecture, excluded: &str) -> Self {
        Self {
            filename: filename.to_string(),
            is_architecture_match: filename.contains(arch.as_str()),
            is_all_arch_marker: filename.contains(ALL_ARCH_MARKER),
            is_excluded: filename.contains(excluded),
        }
    }

    /// Whether this file belongs in the sweep for `arch`
    pub fn is_selected(&self, arch: Architecture) -> bool {
        !self.is_excluded
            && (self.is_architecture_match
                || (arch == Architecture::Arm64 && self.is_all_arch_marker))
    }
}

/// Filters a listing down to the files an architecture needs
#[derive(Debug, Clone)]
pub struct PackageSelector {
    excluded: String,
}

impl Default for PackageSelector {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED)
    }
}

impl PackageSelector {
    /// Selector skipping every name that contains `excluded`
    pub fn new(excluded: impl Into<String>) -> Self {
        Self {
            excluded: excluded.into(),
        }
    }

    /// Classify every listed name, in listing order
    pub fn candidates(&self, listing: &[String], arch: Architecture) -> Vec<PackageCandidate> {
        listing
            .iter()
            .map(|name| PackageCandidate::classify(name, arch, &self.excluded))
            .collect()
    }

    /// Names selected for `arch`, in listing order
    pub fn select(&self, listing: &[String], arch: Architecture) -> Vec<String> {
        self.candidates(listing, arch)
            .into_iter()
            .filter(|candidate| {
                let selected = candidate.is_selected(arch);
                debug!(file = %candidate.filename, selected, "package candidate");
                selected
            })
            .map(|candidate| candidate.filename)
            .collect()
    }
}

/// Select files for `arch` with the default exclusion token
#[cfg(test)]
pub fn select_for_architecture(listing: &[String], arch: Architecture) -> Vec<String> {
    PackageSelector::default().select(listing, arch)
}
