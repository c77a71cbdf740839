//! JSON API handlers (`/api/v1/*`).
//!
//! Input is validated before any store call. Responses use the
//! `{status, message?, task_id?}` envelope throughout.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::error;

use remind_core::Priority;
use remind_store::{StoreError, TaskService};

use crate::state::AppState;

/// Status code + JSON envelope, the uniform API response shape.
pub type ApiResponse = (StatusCode, Json<Value>);

/// Request body for add/update.
#[derive(Debug, Deserialize)]
pub struct TaskPayload {
    /// Task description.
    pub description: Option<String>,
    /// Priority name; missing defaults to `Medium`.
    pub priority: Option<String>,
}

fn success(body: Value) -> ApiResponse {
    (StatusCode::OK, Json(body))
}

fn failure(status: StatusCode, message: &str) -> ApiResponse {
    (
        status,
        Json(json!({"status": "error", "message": message})),
    )
}

/// Strict priority parsing for the API: unknown values are rejected.
fn parse_priority(raw: Option<&str>) -> Result<Priority, ApiResponse> {
    match raw {
        None => Ok(Priority::Medium),
        Some(s) => Priority::parse(s)
            .ok_or_else(|| failure(StatusCode::BAD_REQUEST, &format!("Invalid priority: {s}"))),
    }
}

/// Map a store error onto the response envelope.
///
/// Internal detail stays in the log; the client sees a generic message.
fn store_failure(err: &StoreError) -> ApiResponse {
    if err.is_not_found() {
        failure(StatusCode::NOT_FOUND, "Task not found")
    } else if err.is_invalid_input() {
        failure(StatusCode::BAD_REQUEST, &err.to_string())
    } else {
        error!(error = %err, "store operation failed");
        failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
    }
}

/// `GET /api/v1/tasks`
pub async fn list_tasks(State(state): State<AppState>) -> ApiResponse {
    let result = state
        .conn()
        .and_then(|conn| TaskService::load_tasks(&conn));
    match result {
        Ok(tasks) => success(json!(tasks)),
        Err(err) => store_failure(&err),
    }
}

/// `POST /api/v1/add/tasks`
pub async fn add_task(
    State(state): State<AppState>,
    Json(payload): Json<TaskPayload>,
) -> ApiResponse {
    let priority = match parse_priority(payload.priority.as_deref()) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let description = payload.description.unwrap_or_default();

    let result = state
        .conn()
        .and_then(|conn| TaskService::add_task(&conn, &description, priority));
    match result {
        Ok(task_id) => success(json!({"status": "success", "task_id": task_id})),
        Err(err) => store_failure(&err),
    }
}

/// `PUT /api/v1/update/{id}`
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TaskPayload>,
) -> ApiResponse {
    let priority = match parse_priority(payload.priority.as_deref()) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let description = payload.description.unwrap_or_default();

    let result = state
        .conn()
        .and_then(|conn| TaskService::update_task(&conn, id, &description, priority));
    match result {
        Ok(()) => success(json!({"status": "success"})),
        Err(err) => store_failure(&err),
    }
}

/// `DELETE /api/v1/delete/{id}`
pub async fn delete_task(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResponse {
    let result = state
        .conn()
        .and_then(|conn| TaskService::delete_task(&conn, id));
    match result {
        Ok(()) => success(json!({"status": "success"})),
        Err(err) => store_failure(&err),
    }
}

/// `PUT /api/v1/complete/{id}`
pub async fn complete_task(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResponse {
    mark(state, id, true)
}

/// `PUT /api/v1/incomplete/{id}`
pub async fn incomplete_task(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResponse {
    mark(state, id, false)
}

fn mark(state: AppState, id: i64, completed: bool) -> ApiResponse {
    let result = state
        .conn()
        .and_then(|conn| TaskService::mark_task(&conn, id, completed));
    match result {
        Ok(()) => success(json!({"status": "success"})),
        Err(err) => store_failure(&err),
    }
}
