//! # remind-cron
//!
//! Fires a job once a day at a fixed wall-clock time, polling at a fixed
//! interval. No catch-up on missed runs and no persistence of the last
//! run — a restart simply waits for the next occurrence.

#![deny(unsafe_code)]

pub mod runner;
pub mod schedule;

pub use runner::run_daily;
pub use schedule::DailySchedule;
