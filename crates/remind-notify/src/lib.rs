//! # remind-notify
//!
//! Daily digest of incomplete tasks, delivered per recipient through a
//! transactional-mail HTTP API.
//!
//! Per-recipient failures are captured in the aggregate report and never
//! abort the remaining sends.

#![deny(unsafe_code)]

pub mod digest;
pub mod errors;
pub mod mailer;
pub mod notifier;

pub use digest::{DigestOutcome, compose_digest, greeting_name, valid_recipients};
pub use errors::NotifyError;
pub use mailer::{Mailer, MailerConfig, OutboundEmail, SendResult};
pub use notifier::Notifier;
