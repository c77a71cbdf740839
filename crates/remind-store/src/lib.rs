//! # remind-store
//!
//! Task CRUD with `SQLite` persistence.
//!
//! Layered in the usual way: [`connection`] owns the pool and pragmas,
//! [`migrations`] the DDL, [`repository`] the row-level SQL, and
//! [`service`] the validation and not-found semantics the routes rely on.

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod migrations;
pub mod repository;
pub mod service;

pub use connection::{ConnectionConfig, ConnectionPool, PooledConnection, new_file, new_in_memory};
pub use errors::StoreError;
pub use migrations::run_migrations;
pub use repository::TaskRepository;
pub use service::TaskService;
