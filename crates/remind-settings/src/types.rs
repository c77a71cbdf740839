//! Settings sections.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level settings for the reminder service.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Database settings.
    pub database: DatabaseSettings,
    /// Outbound mail settings.
    pub mail: MailSettings,
    /// Daily digest scheduling.
    pub notify: NotifySettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// HTTP server network settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// HTTP port.
    pub port: u16,
    /// Environment mode (`"production"` or `"development"`).
    pub environment: String,
}

impl ServerSettings {
    /// Whether the server runs in development mode.
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7000,
            environment: "production".to_string(),
        }
    }
}

/// Database location and pool tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseSettings {
    /// Path to the `SQLite` file. A leading `~` expands to `$HOME`.
    pub path: String,
    /// Maximum pool size.
    pub pool_size: u32,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u32,
}

impl DatabaseSettings {
    /// Resolve the configured path, expanding a leading `~`.
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(rest) = self.path.strip_prefix("~/") {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(rest)
        } else {
            PathBuf::from(&self.path)
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "~/.remind/tasks.db".to_string(),
            pool_size: 16,
            busy_timeout_ms: 30_000,
        }
    }
}

/// Outbound transactional-mail settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MailSettings {
    /// Provider region (selects the default endpoint).
    pub region: String,
    /// Explicit API endpoint; overrides the region-derived default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// API token for the mail provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Verified sender address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// Digest recipients.
    pub recipients: Vec<String>,
}

impl MailSettings {
    /// The endpoint to send through: explicit override, or derived from
    /// the region.
    pub fn endpoint_url(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://email.{}.amazonaws.com", self.region))
    }
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            endpoint: None,
            api_token: None,
            sender: None,
            recipients: Vec::new(),
        }
    }
}

/// Daily digest schedule.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotifySettings {
    /// Hour of day to send the digest (local time, 0–23).
    pub hour: u8,
    /// Minute of the hour (0–59).
    pub minute: u8,
    /// Polling interval for the scheduler loop, in seconds.
    pub poll_interval_secs: u64,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            hour: 8,
            minute: 0,
            poll_interval_secs: 60,
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Tracing filter string (e.g. `"info"`, `"remind=debug"`).
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
