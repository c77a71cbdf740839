//! Business logic layer over the repository.
//!
//! Validates input before any SQL runs and maps zero-row writes to
//! [`StoreError::TaskNotFound`], so the route layer only has to translate
//! errors into status codes.

use rusqlite::Connection;
use tracing::debug;

use remind_core::{Priority, Task, validate_description};

use crate::errors::StoreError;
use crate::repository::TaskRepository;

/// Task service with validation and not-found semantics.
pub struct TaskService;

impl TaskService {
    /// Add a task. Returns the new id.
    ///
    /// The description is validated first; the store is untouched when
    /// validation fails.
    pub fn add_task(
        conn: &Connection,
        description: &str,
        priority: Priority,
    ) -> Result<i64, StoreError> {
        validate_description(description)?;
        let created_at = remind_core::time::current_timestamp();
        let id = TaskRepository::insert(conn, description.trim(), priority, &created_at)?;
        debug!(task_id = id, %priority, "task added");
        Ok(id)
    }

    /// Get a task by id.
    pub fn get_task(conn: &Connection, id: i64) -> Result<Task, StoreError> {
        TaskRepository::get(conn, id)?.ok_or(StoreError::TaskNotFound { id })
    }

    /// Load all tasks.
    pub fn load_tasks(conn: &Connection) -> Result<Vec<Task>, StoreError> {
        TaskRepository::list(conn)
    }

    /// Load incomplete tasks (the digest input).
    pub fn incomplete_tasks(conn: &Connection) -> Result<Vec<Task>, StoreError> {
        TaskRepository::list_incomplete(conn)
    }

    /// Update description and priority of an existing task.
    pub fn update_task(
        conn: &Connection,
        id: i64,
        description: &str,
        priority: Priority,
    ) -> Result<(), StoreError> {
        validate_description(description)?;
        if !TaskRepository::update(conn, id, description.trim(), priority)? {
            return Err(StoreError::TaskNotFound { id });
        }
        debug!(task_id = id, "task updated");
        Ok(())
    }

    /// Delete a task.
    pub fn delete_task(conn: &Connection, id: i64) -> Result<(), StoreError> {
        if !TaskRepository::delete(conn, id)? {
            return Err(StoreError::TaskNotFound { id });
        }
        debug!(task_id = id, "task deleted");
        Ok(())
    }

    /// Mark a task complete or incomplete.
    pub fn mark_task(conn: &Connection, id: i64, completed: bool) -> Result<(), StoreError> {
        if !TaskRepository::set_completed(conn, id, completed)? {
            return Err(StoreError::TaskNotFound { id });
        }
        debug!(task_id = id, completed, "task marked");
        Ok(())
    }
}
