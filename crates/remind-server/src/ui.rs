//! Server-rendered HTML UI.
//!
//! Form posts either redirect back to `/` with a flash message in the
//! query string, or — when the page scripts submit with
//! `X-Requested-With: XMLHttpRequest` — get a JSON `{status, message}`
//! body for the toast system.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use remind_core::text::escape_html;
use remind_core::{Priority, Task};
use remind_store::{StoreError, TaskService};

use crate::state::AppState;

/// One-shot flash message carried through the redirect query string.
#[derive(Debug, Default, Deserialize)]
pub struct FlashParams {
    /// Message text.
    pub flash: Option<String>,
    /// `"success"` or `"error"`.
    pub flash_kind: Option<String>,
}

/// Urlencoded form body for add/update.
#[derive(Debug, Deserialize)]
pub struct TaskForm {
    /// Task description.
    pub description: Option<String>,
    /// Priority name; unknown values silently become `Medium`.
    pub priority: Option<String>,
}

fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

/// Redirect to `/` carrying a flash message.
fn flash_redirect(message: &str, kind: &str) -> Redirect {
    let url = format!(
        "/?flash={}&flash_kind={}",
        urlencoding::encode(message),
        urlencoding::encode(kind)
    );
    Redirect::to(&url)
}

/// Respond to a form post: JSON toast for AJAX, flash redirect otherwise.
fn form_response(
    headers: &HeaderMap,
    result: Result<&str, &StoreError>,
) -> Response {
    match result {
        Ok(message) => {
            if is_ajax(headers) {
                axum::Json(json!({"status": "success", "message": message})).into_response()
            } else {
                flash_redirect(message, "success").into_response()
            }
        }
        Err(err) => {
            let (status, message) = if err.is_not_found() {
                (StatusCode::NOT_FOUND, "Task not found".to_string())
            } else if err.is_invalid_input() {
                (StatusCode::BAD_REQUEST, err.to_string())
            } else {
                error!(error = %err, "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            };
            if is_ajax(headers) {
                (
                    status,
                    axum::Json(json!({"status": "error", "message": message})),
                )
                    .into_response()
            } else {
                flash_redirect(&message, "error").into_response()
            }
        }
    }
}

/// `GET /` — the task list page.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<FlashParams>,
) -> Response {
    let result = state
        .conn()
        .and_then(|conn| TaskService::load_tasks(&conn));
    match result {
        Ok(tasks) => {
            let flash = params
                .flash
                .as_deref()
                .map(|msg| (msg, params.flash_kind.as_deref().unwrap_or("success")));
            Html(render_index(&tasks, flash)).into_response()
        }
        Err(err) => {
            error!(error = %err, "failed to load tasks");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_message_page("Something went wrong", "Internal error")),
            )
                .into_response()
        }
    }
}

/// `GET /update/{id}` — the edit form.
pub async fn edit_page(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let result = state.conn().and_then(|conn| TaskService::get_task(&conn, id));
    match result {
        Ok(task) => Html(render_edit(&task)).into_response(),
        Err(err) if err.is_not_found() => (
            StatusCode::NOT_FOUND,
            Html(render_message_page("Task not found", "No such task.")),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "failed to load task");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_message_page("Something went wrong", "Internal error")),
            )
                .into_response()
        }
    }
}

/// `POST /add`
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Form(form): axum::Form<TaskForm>,
) -> Response {
    // UI contract: bad priority values silently default to Medium
    let priority = Priority::parse_lossy(form.priority.as_deref().unwrap_or(""));
    let description = form.description.unwrap_or_default();

    let result = state
        .conn()
        .and_then(|conn| TaskService::add_task(&conn, &description, priority));
    match result {
        Ok(_) => form_response(&headers, Ok("Task added successfully")),
        Err(err) => form_response(&headers, Err(&err)),
    }
}

/// `POST /update/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    axum::Form(form): axum::Form<TaskForm>,
) -> Response {
    let priority = Priority::parse_lossy(form.priority.as_deref().unwrap_or(""));
    let description = form.description.unwrap_or_default();

    let result = state
        .conn()
        .and_then(|conn| TaskService::update_task(&conn, id, &description, priority));
    match result {
        Ok(()) => form_response(&headers, Ok("Task updated successfully")),
        Err(err) => form_response(&headers, Err(&err)),
    }
}

/// `POST /delete/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let result = state
        .conn()
        .and_then(|conn| TaskService::delete_task(&conn, id));
    match result {
        Ok(()) => form_response(&headers, Ok("Task deleted successfully")),
        Err(err) => form_response(&headers, Err(&err)),
    }
}

/// `POST /complete/{id}`
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let result = state
        .conn()
        .and_then(|conn| TaskService::mark_task(&conn, id, true));
    match result {
        Ok(()) => form_response(&headers, Ok("Task marked as complete")),
        Err(err) => form_response(&headers, Err(&err)),
    }
}

/// `POST /incomplete/{id}`
pub async fn incomplete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let result = state
        .conn()
        .and_then(|conn| TaskService::mark_task(&conn, id, false));
    match result {
        Ok(()) => form_response(&headers, Ok("Task marked as incomplete")),
        Err(err) => form_response(&headers, Err(&err)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

fn page_shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; }}\n\
         table {{ width: 100%; border-collapse: collapse; }}\n\
         th, td {{ text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid #ddd; }}\n\
         .completed {{ text-decoration: line-through; color: #888; }}\n\
         .flash-success {{ background: #e6f4ea; border: 1px solid #b7dfc2; padding: 0.5rem 0.8rem; }}\n\
         .flash-error {{ background: #fdecea; border: 1px solid #f5c6c2; padding: 0.5rem 0.8rem; }}\n\
         form.inline {{ display: inline; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         {body}\n\
         </body>\n\
         </html>\n"
    )
}

fn priority_options(selected: Priority) -> String {
    Priority::ALL
        .iter()
        .map(|p| {
            let marker = if *p == selected { " selected" } else { "" };
            format!("<option value=\"{p}\"{marker}>{p}</option>")
        })
        .collect::<Vec<_>>()
        .join("")
}

fn render_flash(flash: Option<(&str, &str)>) -> String {
    match flash {
        Some((message, kind)) => {
            let class = if kind == "error" {
                "flash-error"
            } else {
                "flash-success"
            };
            format!("<div class=\"{class}\">{}</div>\n", escape_html(message))
        }
        None => String::new(),
    }
}

fn render_task_row(task: &Task) -> String {
    let desc_class = if task.completed { " class=\"completed\"" } else { "" };
    let toggle = if task.completed {
        format!(
            "<form class=\"inline\" method=\"post\" action=\"/incomplete/{}\">\
             <button type=\"submit\">Reopen</button></form>",
            task.id
        )
    } else {
        format!(
            "<form class=\"inline\" method=\"post\" action=\"/complete/{}\">\
             <button type=\"submit\">Done</button></form>",
            task.id
        )
    };
    format!(
        "<tr>\
         <td{desc_class}>{}</td>\
         <td>{}</td>\
         <td>{}</td>\
         <td>{toggle} \
         <a href=\"/update/{}\">Edit</a> \
         <form class=\"inline\" method=\"post\" action=\"/delete/{}\">\
         <button type=\"submit\">Delete</button></form></td>\
         </tr>",
        escape_html(&task.description),
        task.priority,
        escape_html(&task.created_at),
        task.id,
        task.id,
    )
}

fn render_index(tasks: &[Task], flash: Option<(&str, &str)>) -> String {
    let rows: Vec<String> = tasks.iter().map(render_task_row).collect();
    let table = if tasks.is_empty() {
        "<p>No tasks yet.</p>".to_string()
    } else {
        format!(
            "<table>\n\
             <tr><th>Description</th><th>Priority</th><th>Created</th><th></th></tr>\n\
             {}\n\
             </table>",
            rows.join("\n")
        )
    };

    let body = format!(
        "{}\
         <h1>Task Reminder</h1>\n\
         <form method=\"post\" action=\"/add\">\n\
         <input type=\"text\" name=\"description\" placeholder=\"What needs doing?\" required>\n\
         <select name=\"priority\">{}</select>\n\
         <button type=\"submit\">Add</button>\n\
         </form>\n\
         {table}",
        render_flash(flash),
        priority_options(Priority::Medium),
    );
    page_shell("Task Reminder", &body)
}

fn render_edit(task: &Task) -> String {
    let body = format!(
        "<h1>Edit task</h1>\n\
         <form method=\"post\" action=\"/update/{}\">\n\
         <input type=\"text\" name=\"description\" value=\"{}\" required>\n\
         <select name=\"priority\">{}</select>\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n\
         <p><a href=\"/\">Back</a></p>",
        task.id,
        escape_html(&task.description),
        priority_options(task.priority),
    );
    page_shell("Edit task", &body)
}

fn render_message_page(title: &str, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back</a></p>",
        escape_html(title),
        escape_html(message)
    );
    page_shell(title, &body)
}
