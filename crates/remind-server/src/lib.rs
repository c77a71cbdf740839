//! # remind-server
//!
//! Axum HTTP server for the task reminder service.
//!
//! - JSON API under `/api/v1/*` (CORS-enabled)
//! - Server-rendered HTML UI at `/` with form posts + flash redirects
//! - `/health` endpoint
//! - Graceful shutdown via `CancellationToken`

#![deny(unsafe_code)]

pub mod api;
pub mod health;
pub mod server;
pub mod shutdown;
pub mod state;
pub mod ui;

pub use server::{ServerConfig, ServerError, TaskServer, build_router};
pub use shutdown::ShutdownCoordinator;
pub use state::AppState;
