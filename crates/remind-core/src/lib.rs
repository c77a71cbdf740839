//! # remind-core
//!
//! Foundation types for the task reminder service: the [`Task`] model,
//! the [`Priority`] enum, input validation, and the human-readable
//! timestamp format shared by the store and the UI.

#![deny(unsafe_code)]

pub mod task;
pub mod text;
pub mod time;
pub mod validate;

pub use task::{Priority, Task};
pub use validate::{MAX_DESCRIPTION_LENGTH, ValidationError, validate_description};
