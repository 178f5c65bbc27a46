//! Convenience alias setup
//!
//! Aliases are appended to an existing shell startup file. A definition
//! already present as a line of the file is never written again, so
//! repeated runs leave the file unchanged.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{Result, fs as fs_error};

/// Append every alias not yet present in `rc_file`, returning how many
/// were written. The file must already exist.
pub fn append_missing(rc_file: &Path, aliases: &[String]) -> Result<usize> {
    let existing = fs::read_to_string(rc_file).map_err(|e| fs_error::io_error(rc_file, &e))?;
    let mut present: Vec<&str> = existing.lines().map(str::trim).collect();

    let mut missing = Vec::new();
    for alias in aliases {
        let alias = alias.trim();
        if !present.contains(&alias) {
            present.push(alias);
            missing.push(alias);
        }
    }

    if missing.is_empty() {
        return Ok(0);
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(rc_file)
        .map_err(|e| fs_error::io_error(rc_file, &e))?;
    for alias in &missing {
        writeln!(file, "\n{alias}").map_err(|e| fs_error::io_error(rc_file, &e))?;
    }

    info!(rc_file = %rc_file.display(), added = missing.len(), "appended aliases");
    Ok(missing.len())
}
