//! Package repository access
//!
//! Registration (signing key and source list entry), listing URLs, and the
//! download of individual package files. All network and privileged file
//! operations go through the shell with every argument quoted.

pub mod listing;
pub mod selection;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::RepositoryConfig;
use crate::error::{Result, shell as shell_error};
use crate::shell::{self, CURL, Shell};

/// Remote package repository described by configuration
pub struct Repository<'a> {
    config: &'a RepositoryConfig,
    shell: &'a dyn Shell,
}

impl<'a> Repository<'a> {
    pub fn new(config: &'a RepositoryConfig, shell: &'a dyn Shell) -> Self {
        Self { config, shell }
    }

    /// Source list line for `distro`
    pub fn source_entry(&self, distro: &str) -> String {
        format!(
            "deb [signed-by={}] {}/ {} {}",
            self.config.keyring_path.display(),
            self.config.base_url.trim_end_matches('/'),
            distro,
            self.config.component
        )
    }

    /// Install the signing key and write the source list entry
    pub fn register(&self, distro: &str) -> Result<()> {
        let keyring = path_arg(&self.config.keyring_path)?;
        let fetch_key = format!(
            "sudo {CURL} {} --output {}",
            shell::quote(&self.config.key_url)?,
            shell::quote(&keyring)?
        );
        self.shell.execute(&fetch_key)?;

        let source_list = path_arg(&self.config.source_list_path)?;
        let write_entry = format!(
            "echo {} | sudo tee {} >/dev/null",
            shell::quote(&self.source_entry(distro))?,
            shell::quote(&source_list)?
        );
        self.shell.execute(&write_entry)?;

        info!(distro, source_list = %source_list, "registered package repository");
        Ok(())
    }

    /// Directory listing URL for `distro`
    pub fn listing_url(&self, distro: &str) -> String {
        format!(
            "{}/{}/{}/",
            self.config.base_url.trim_end_matches('/'),
            self.config.packages_owner,
            distro
        )
    }

    /// Fetch the directory listing document for `distro`
    pub fn fetch_listing(&self, distro: &str) -> Result<String> {
        let url = self.listing_url(distro);
        let html = self
            .shell
            .capture(&format!("{CURL} {}", shell::quote(&url)?))?;
        Ok(html.unwrap_or_default())
    }

    /// Download `href` from the listing at `listing_url` into `directory`,
    /// returning the local file path.
    pub fn download(&self, listing_url: &str, href: &str, directory: &Path) -> Result<PathBuf> {
        let file_name = local_file_name(href).ok_or_else(|| {
            shell_error::command_failed(
                format!("download {href}"),
                "listing entry has no usable file name",
            )
        })?;
        let destination = directory.join(file_name);

        let command = format!(
            "{CURL} {} --output {}",
            shell::quote(&package_url(listing_url, href))?,
            shell::quote(&path_arg(&destination)?)?
        );
        self.shell.execute(&command)?;
        Ok(destination)
    }
}

/// Absolute URL for a listing entry
pub fn package_url(listing_url: &str, href: &str) -> String {
    if href.contains("://") {
        href.to_string()
    } else {
        format!("{listing_url}{}", href.trim_start_matches("./"))
    }
}

/// Last path segment of a listing entry, if it names a file
pub fn local_file_name(href: &str) -> Option<&str> {
    let name = href.rsplit('/').next()?;
    match name {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}

pub(crate) fn path_arg(path: &Path) -> Result<String> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        shell_error::command_failed(
            path.display().to_string(),
            "path is not valid UTF-8",
        )
    })
}
