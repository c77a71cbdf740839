//! SQL data access layer for tasks.
//!
//! All methods take a `&Connection` parameter and are stateless — pure
//! functions that translate between Rust types and SQL. Each write is a
//! single autocommitted statement.

use rusqlite::{Connection, OptionalExtension, params};

use remind_core::{Priority, Task};

use crate::errors::StoreError;

/// Task repository for SQL CRUD operations.
pub struct TaskRepository;

impl TaskRepository {
    /// Insert a new task. Returns the assigned row id.
    pub fn insert(
        conn: &Connection,
        description: &str,
        priority: Priority,
        created_at: &str,
    ) -> Result<i64, StoreError> {
        let _ = conn.execute(
            "INSERT INTO tasks (description, priority, completed, created_at) \
             VALUES (?1, ?2, 0, ?3)",
            params![description, priority.as_sql(), created_at],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a task by id.
    pub fn get(conn: &Connection, id: i64) -> Result<Option<Task>, StoreError> {
        let task = conn
            .query_row(
                "SELECT id, description, priority, completed, created_at \
                 FROM tasks WHERE id = ?1",
                params![id],
                task_from_row,
            )
            .optional()?;
        Ok(task)
    }

    /// Load all tasks in insertion order.
    pub fn list(conn: &Connection) -> Result<Vec<Task>, StoreError> {
        let mut stmt = conn.prepare(
            "SELECT id, description, priority, completed, created_at \
             FROM tasks ORDER BY id",
        )?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .filter_map(Result::ok)
            .collect();
        Ok(tasks)
    }

    /// Load only incomplete tasks, in insertion order.
    pub fn list_incomplete(conn: &Connection) -> Result<Vec<Task>, StoreError> {
        let mut stmt = conn.prepare(
            "SELECT id, description, priority, completed, created_at \
             FROM tasks WHERE completed = 0 ORDER BY id",
        )?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .filter_map(Result::ok)
            .collect();
        Ok(tasks)
    }

    /// Update description and priority. Returns true if a row changed.
    pub fn update(
        conn: &Connection,
        id: i64,
        description: &str,
        priority: Priority,
    ) -> Result<bool, StoreError> {
        let changed = conn.execute(
            "UPDATE tasks SET description = ?1, priority = ?2 WHERE id = ?3",
            params![description, priority.as_sql(), id],
        )?;
        Ok(changed > 0)
    }

    /// Delete a task by id. Returns true if a row was deleted.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool, StoreError> {
        let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Set the completed flag. Returns true if the row exists.
    ///
    /// Idempotent — setting the same value again still counts as a match.
    pub fn set_completed(conn: &Connection, id: i64, completed: bool) -> Result<bool, StoreError> {
        let changed = conn.execute(
            "UPDATE tasks SET completed = ?1 WHERE id = ?2",
            params![i32::from(completed), id],
        )?;
        Ok(changed > 0)
    }

    /// Count all tasks.
    pub fn count(conn: &Connection) -> Result<u64, StoreError> {
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        Ok(count)
    }
}

/// Convert a row into a [`Task`].
///
/// Unknown priority strings fall back to `Medium`, matching the schema
/// default.
fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    let priority_str: String = row.get(2)?;
    let completed: i64 = row.get(3)?;
    Ok(Task {
        id: row.get(0)?,
        description: row.get(1)?,
        priority: Priority::parse_lossy(&priority_str),
        completed: completed != 0,
        created_at: row.get(4)?,
    })
}
