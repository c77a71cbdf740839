//! Shared state accessible from Axum handlers.

use std::time::Instant;

use remind_store::{ConnectionPool, PooledConnection, StoreError};

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    /// Store connection pool.
    pub pool: ConnectionPool,
    /// When the server started.
    pub start_time: Instant,
}

impl AppState {
    /// Create state over an opened pool.
    pub fn new(pool: ConnectionPool) -> Self {
        Self {
            pool,
            start_time: Instant::now(),
        }
    }

    /// Check a connection out of the pool.
    pub fn conn(&self) -> Result<PooledConnection, StoreError> {
        self.pool.get().map_err(StoreError::from)
    }
}
