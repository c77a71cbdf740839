//! Digest composition: recipient filtering, greeting, message bodies,
//! and the aggregate outcome.

use remind_core::Task;
use remind_core::text::{capitalize, escape_html};

use crate::mailer::{OutboundEmail, SendResult};

/// Digest subject line.
pub const SUBJECT: &str = "Daily Task Reminder";

/// Aggregate result of one digest run.
#[derive(Clone, Debug)]
pub enum DigestOutcome {
    /// Every task is complete — nothing was sent.
    NothingToDo,
    /// No configured recipient passed validation — nothing was sent.
    NoValidRecipients,
    /// One send was attempted per valid recipient.
    Sent(Vec<SendResult>),
}

impl DigestOutcome {
    /// Number of successful sends.
    pub fn sent_count(&self) -> usize {
        match self {
            Self::Sent(results) => results.iter().filter(|r| r.success).count(),
            _ => 0,
        }
    }
}

impl std::fmt::Display for DigestOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingToDo => f.write_str("No incomplete tasks to notify"),
            Self::NoValidRecipients => f.write_str("Error: No valid recipient emails provided"),
            Self::Sent(results) => {
                let lines: Vec<String> = results
                    .iter()
                    .map(|r| {
                        if r.success {
                            format!(
                                "Email sent to {}! Message ID: {}",
                                r.recipient,
                                r.message_id.as_deref().unwrap_or("unknown")
                            )
                        } else {
                            format!(
                                "Error sending email to {}: {}",
                                r.recipient,
                                r.error.as_deref().unwrap_or("unknown error")
                            )
                        }
                    })
                    .collect();
                f.write_str(&lines.join("\n"))
            }
        }
    }
}

/// Filter the configured recipient list down to plausible addresses.
///
/// Trims whitespace, drops empties, and requires an `@`. This is the full
/// extent of address validation — the provider does the real check.
pub fn valid_recipients(recipients: &[String]) -> Vec<String> {
    recipients
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty() && r.contains('@'))
        .map(String::from)
        .collect()
}

/// Derive a greeting name from an email address.
///
/// Takes the local part, cuts at the first `.`, and capitalizes:
/// `john.doe@x.com` → `John`.
pub fn greeting_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let first = local.split('.').next().unwrap_or(local);
    capitalize(first)
}

/// Compose the digest message for one recipient.
pub fn compose_digest(recipient: &str, incomplete: &[Task]) -> OutboundEmail {
    let username = greeting_name(recipient);

    let task_details: Vec<String> = incomplete
        .iter()
        .map(|t| format!("Task Name: {}\nPriority: {}", t.description, t.priority))
        .collect();

    let body_text = format!(
        "Hi {username},\n\
         \n\
         We hope this message finds you well.\n\
         This is a friendly reminder of your incomplete tasks as of today.\n\
         \n\
         Please find the details below.\n\
         \n\
         Your Incomplete Tasks\n\
         {}\n\
         \n\
         Please take a moment to review and update your task status as needed.\n\
         \n\
         Best regards,\n\
         The Task Reminder Team\n",
        task_details.join("\n")
    );

    let task_paragraphs: Vec<String> = incomplete
        .iter()
        .map(|t| {
            format!(
                "<p>Task Name: {}<br>Priority: {}</p>",
                escape_html(&t.description),
                t.priority
            )
        })
        .collect();

    let body_html = format!(
        "<html>\n\
         <head></head>\n\
         <body>\n\
         <p>Hi {username},</p>\n\
         <p>We hope this message finds you well. \
         This is a friendly reminder of your incomplete tasks as of today.</p>\n\
         <p>Please find the details below.</p>\n\
         <h2>Your Incomplete Tasks</h2>\n\
         {}\n\
         <p>Please take a moment to review and update your task status as needed.</p>\n\
         <p>Best regards,<br>The Task Reminder Team</p>\n\
         </body>\n\
         </html>\n",
        task_paragraphs.join("\n")
    );

    OutboundEmail {
        subject: SUBJECT.to_string(),
        body_text,
        body_html,
    }
}
