//! Platform errors

use super::WaydrError;

/// Creates an unsupported platform error listing the accepted values
pub fn unsupported(
    what: impl Into<String>,
    value: impl Into<String>,
    supported: impl Into<String>,
) -> WaydrError {
    WaydrError::UnsupportedPlatform {
        what: what.into(),
        value: value.into(),
        supported: supported.into(),
    }
}

/// Creates an unsupported session error
pub fn unsupported_session(required: impl Into<String>, detected: impl Into<String>) -> WaydrError {
    WaydrError::UnsupportedSession {
        required: required.into(),
        detected: detected.into(),
    }
}
