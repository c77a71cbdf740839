//! SQL DDL for the task tables.
//!
//! The `users` and `categories` tables are declared for forward
//! compatibility with the original schema but nothing reads them yet.

use rusqlite::Connection;

use crate::errors::StoreError;

/// Run all migrations.
///
/// Idempotent — safe to call multiple times (uses `IF NOT EXISTS`).
pub fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Combined DDL for all tables.
const SCHEMA: &str = r"
-- Tasks table
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    priority TEXT NOT NULL DEFAULT 'Medium'
        CHECK(priority IN ('Low', 'Medium', 'High'))
);

CREATE INDEX IF NOT EXISTS idx_tasks_completed
    ON tasks(completed);

-- Users table (declared, not yet used)
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    email TEXT UNIQUE NOT NULL,
    created_at TEXT NOT NULL
);

-- Categories table (declared, not yet used)
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL,
    color TEXT DEFAULT '#007bff',
    created_at TEXT NOT NULL
);
";

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use super::*;

    fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn migrations_create_all_tables() {
        let conn = setup_db();
        let tables: Vec<String> = conn
            .prepare(
                "SELECT name FROM sqlite_master WHERE type='table' \
                 AND name NOT LIKE 'sqlite_%' ORDER BY name",
            )
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(Result::ok)
            .collect();

        assert!(tables.contains(&"tasks".to_string()));
        assert!(tables.contains(&"users".to_string()));
        assert!(tables.contains(&"categories".to_string()));
    }

    #[test]
    fn migrations_idempotent() {
        let conn = setup_db();
        run_migrations(&conn).unwrap();
    }

    #[test]
    fn priority_check_constraint_enforced() {
        let conn = setup_db();
        let result = conn.execute(
            "INSERT INTO tasks (description, created_at, priority) \
             VALUES ('x', 'now', 'Urgent')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn priority_defaults_to_medium() {
        let conn = setup_db();
        conn.execute(
            "INSERT INTO tasks (description, created_at) VALUES ('x', 'now')",
            [],
        )
        .unwrap();
        let priority: String = conn
            .query_row("SELECT priority FROM tasks WHERE id = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(priority, "Medium");
    }
}
