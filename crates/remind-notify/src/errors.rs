//! Notifier error types.

use thiserror::Error;

/// Errors from the notification pipeline.
///
/// Per-recipient send failures are *not* errors — they are recorded in the
/// [`crate::digest::DigestOutcome`]. These variants cover configuration and
/// store problems that prevent the digest from running at all.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Mail settings are incomplete.
    #[error("mail configuration incomplete: {0}")]
    Config(&'static str),

    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Loading tasks from the store failed.
    #[error(transparent)]
    Store(#[from] remind_store::StoreError),
}
