//! # remind-settings
//!
//! Configuration management with layered sources.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`Settings::default()`]
//! 2. **User file** — `~/.remind/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `REMIND_*` overrides (highest priority)

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::sync::OnceLock;

/// Global settings singleton, initialized on first access.
static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.remind/settings.json` with env
/// var overrides. Falls back to compiled defaults if loading fails.
pub fn get_settings() -> &'static Settings {
    SETTINGS.get_or_init(|| load_settings().unwrap_or_default())
}

/// Initialize the global settings with a specific value.
///
/// # Errors
///
/// Returns the provided settings back if the global was already initialized.
#[allow(clippy::result_large_err)]
pub fn init_settings(settings: Settings) -> std::result::Result<(), Settings> {
    SETTINGS.set(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 7000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.mail.region, "us-east-1");
        assert_eq!(settings.notify.hour, 8);
        assert_eq!(settings.notify.minute, 0);
        assert_eq!(settings.notify.poll_interval_secs, 60);
        assert_eq!(settings.logging.level, "info");
        assert!(settings.mail.recipients.is_empty());
    }

    #[test]
    fn deep_merge_re_exported() {
        let a = serde_json::json!({"x": 1});
        let b = serde_json::json!({"y": 2});
        let merged = deep_merge(a, b);
        assert_eq!(merged["x"], 1);
        assert_eq!(merged["y"], 2);
    }
}
