//! Task model and the priority enum.

use serde::{Deserialize, Serialize};

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Row id assigned by the store.
    pub id: i64,
    /// User-entered description (non-empty, length-bounded).
    pub description: String,
    /// Priority level.
    pub priority: Priority,
    /// Whether the task has been completed.
    pub completed: bool,
    /// Creation timestamp in the application's display format
    /// (see [`crate::time::format_datetime`]).
    pub created_at: String,
}

/// Task priority levels.
///
/// The SQL and JSON representation is the capitalized variant name
/// (`"Low"`, `"Medium"`, `"High"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority (the default).
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// All variants, in ascending order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// The SQL string stored in the `priority` column.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Strict parse. Returns `None` for anything outside the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }

    /// Lossy parse: unknown values fall back to `Medium`.
    ///
    /// Used when converting rows (the schema default) and by the HTML UI.
    pub fn parse_lossy(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}
