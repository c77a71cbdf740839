//! Settings error types.

use thiserror::Error;

/// Result alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors from loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Could not read the settings file.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file contains invalid JSON.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
