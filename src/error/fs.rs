//! File system errors

use std::path::Path;

use super::WaydrError;

/// Creates a file system failure for a path
pub fn failure(path: &Path, reason: impl Into<String>) -> WaydrError {
    WaydrError::FilesystemFailure {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Maps an IO error on `path` into a file system failure
pub fn io_error(path: &Path, err: &std::io::Error) -> WaydrError {
    failure(path, err.to_string())
}
