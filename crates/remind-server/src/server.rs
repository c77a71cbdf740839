//! `TaskServer` — Axum HTTP server for the task API and UI.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderValue, Method, header};
use axum::response::Json;
use axum::routing::{delete, get, post, put};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use remind_store::TaskRepository;

use crate::health::{self, HealthResponse};
use crate::shutdown::ShutdownCoordinator;
use crate::state::AppState;
use crate::{api, ui};

/// Configuration for the HTTP server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host to bind.
    pub host: String,
    /// Port to bind (0 for auto-assign).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 7000,
        }
    }
}

/// Errors from running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Could not bind the listen address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The address that failed.
        addr: String,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The serve loop failed.
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Build the full router: UI, JSON API (CORS-enabled), health.
pub fn build_router(state: AppState) -> Router {
    // The JS frontend dev server runs on :3000; the API allows it
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("http://localhost:3000"))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/api/v1/tasks", get(api::list_tasks))
        .route("/api/v1/add/tasks", post(api::add_task))
        .route("/api/v1/update/{id}", put(api::update_task))
        .route("/api/v1/delete/{id}", delete(api::delete_task))
        .route("/api/v1/complete/{id}", put(api::complete_task))
        .route("/api/v1/incomplete/{id}", put(api::incomplete_task))
        .layer(cors);

    let ui_routes = Router::new()
        .route("/", get(ui::index))
        .route("/add", post(ui::add))
        .route("/update/{id}", get(ui::edit_page).post(ui::update))
        .route("/delete/{id}", post(ui::delete))
        .route("/complete/{id}", post(ui::complete))
        .route("/incomplete/{id}", post(ui::incomplete));

    Router::new()
        .merge(api_routes)
        .merge(ui_routes)
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The task reminder HTTP server.
pub struct TaskServer {
    config: ServerConfig,
    state: AppState,
    shutdown: Arc<ShutdownCoordinator>,
}

impl TaskServer {
    /// Create a new server.
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state,
            shutdown: Arc::new(ShutdownCoordinator::new()),
        }
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Get the shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind and serve until the shutdown token fires.
    pub async fn serve(&self) -> Result<(), ServerError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        if let Ok(local) = listener.local_addr() {
            info!(addr = %local, "HTTP server listening");
        }

        let token = self.shutdown.token();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { token.cancelled().await })
            .await?;
        Ok(())
    }
}

/// `GET /health`
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let tasks = state
        .conn()
        .and_then(|conn| TaskRepository::count(&conn))
        .unwrap_or(0);
    Json(health::health_check(state.start_time, tasks))
}
