use thiserror::Error;
use tracing::{error, warn};

use crate::notes::NoteId;
use crate::panels::PanelId;
use crate::shortcuts::ShortcutParseError;

/// Failures while binding a key combination.
///
/// None of these are fatal: the app keeps running without the binding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HotkeyError {
    #[error("hotkey '{shortcut}' is already bound by another application")]
    AlreadyBoundElsewhere { shortcut: String },

    #[error("failed to install hotkey handler: {0}")]
    InstallFailed(String),

    #[error("invalid shortcut: {0}")]
    InvalidShortcut(#[from] ShortcutParseError),

    #[error("key '{0}' cannot be registered as a global hotkey")]
    Unsupported(String),
}

/// Failures reading or writing the notes file.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("notes file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("notes file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of panel operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    #[error("window operation failed: {0}")]
    Host(String),

    #[error("note {0} does not exist")]
    NoteNotFound(NoteId),

    #[error("search panel is not open")]
    SearchPanelClosed,

    #[error("panel {0} is not open")]
    PanelClosed(PanelId),
}

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use comfy_notes::error::ResultExt;
///
/// // Keep running without the launcher hotkey
/// let handle = registry.register(shortcut, scope, action).log_err();
///
/// // Log as warning for expected failures
/// let notes = file.load().warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = %err,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = %err,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_err_passes_values_through() {
        let ok: Result<u32, HotkeyError> = Ok(7);
        assert_eq!(ok.log_err(), Some(7));

        let err: Result<u32, HotkeyError> = Err(HotkeyError::InstallFailed("no loop".into()));
        assert_eq!(err.warn_on_err(), None);
    }

    #[test]
    fn parse_errors_convert_into_hotkey_errors() {
        let err: HotkeyError = ShortcutParseError::MissingKey.into();
        assert_eq!(
            err.to_string(),
            "invalid shortcut: shortcut has no key, only modifiers"
        );
    }
}
