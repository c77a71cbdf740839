//! The notifier: load incomplete tasks, fan out one email per recipient.

use tracing::{error, info};

use remind_store::{ConnectionPool, StoreError, TaskService};

use crate::digest::{DigestOutcome, compose_digest, valid_recipients};
use crate::errors::NotifyError;
use crate::mailer::Mailer;

/// Sends the daily digest of incomplete tasks.
pub struct Notifier {
    pool: ConnectionPool,
    mailer: Mailer,
    recipients: Vec<String>,
}

impl Notifier {
    /// Create a notifier over a store pool and a configured mailer.
    pub fn new(pool: ConnectionPool, mailer: Mailer, recipients: Vec<String>) -> Self {
        Self {
            pool,
            mailer,
            recipients,
        }
    }

    /// Run one digest pass.
    ///
    /// Sends sequentially, one message per valid recipient; individual
    /// failures are recorded in the outcome and do not stop later sends.
    pub async fn run(&self) -> Result<DigestOutcome, NotifyError> {
        let incomplete = {
            let conn = self.pool.get().map_err(StoreError::from)?;
            TaskService::incomplete_tasks(&conn)?
        };

        if incomplete.is_empty() {
            info!("no incomplete tasks to notify");
            return Ok(DigestOutcome::NothingToDo);
        }

        let recipients = valid_recipients(&self.recipients);
        if recipients.is_empty() {
            error!("no valid recipient emails provided");
            return Ok(DigestOutcome::NoValidRecipients);
        }

        info!(
            task_count = incomplete.len(),
            recipient_count = recipients.len(),
            "sending digest"
        );

        let mut results = Vec::with_capacity(recipients.len());
        for recipient in &recipients {
            let email = compose_digest(recipient, &incomplete);
            results.push(self.mailer.send(recipient, &email).await);
        }

        Ok(DigestOutcome::Sent(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remind_core::Priority;
    use remind_store::{ConnectionConfig, new_file, run_migrations};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::mailer::MailerConfig;

    fn make_pool(dir: &tempfile::TempDir) -> ConnectionPool {
        let db = dir.path().join("tasks.db");
        let pool = new_file(db.to_str().unwrap(), &ConnectionConfig::default()).unwrap();
        run_migrations(&pool.get().unwrap()).unwrap();
        pool
    }

    fn make_mailer(endpoint: String) -> Mailer {
        Mailer::new(MailerConfig {
            endpoint,
            api_token: "t".to_string(),
            sender: "reminder@example.com".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn zero_incomplete_tasks_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let pool = make_pool(&dir);
        // A completed task does not count
        let conn = pool.get().unwrap();
        let id = TaskService::add_task(&conn, "done", Priority::Low).unwrap();
        TaskService::mark_task(&conn, id, true).unwrap();
        drop(conn);

        // Mock server with expect(0): any request would fail the test
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let notifier = Notifier::new(pool, make_mailer(server.uri()), vec!["a@x.com".to_string()]);
        let outcome = notifier.run().await.unwrap();
        assert!(matches!(outcome, DigestOutcome::NothingToDo));
        assert_eq!(outcome.to_string(), "No incomplete tasks to notify");
    }

    #[tokio::test]
    async fn invalid_recipients_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let pool = make_pool(&dir);
        let conn = pool.get().unwrap();
        let _ = TaskService::add_task(&conn, "open", Priority::High).unwrap();
        drop(conn);

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/outbound-emails"))
            .and(body_partial_json(serde_json::json!({"to": ["a@x.com"]})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message_id": "m-1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let notifier = Notifier::new(
            pool,
            make_mailer(server.uri()),
            vec!["a@x.com".to_string(), "not-an-email".to_string()],
        );
        let outcome = notifier.run().await.unwrap();
        match outcome {
            DigestOutcome::Sent(ref results) => {
                assert_eq!(results.len(), 1);
                assert_eq!(results[0].recipient, "a@x.com");
                assert!(results[0].success);
            }
            other => panic!("expected Sent, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn all_recipients_invalid_is_an_error_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let pool = make_pool(&dir);
        let conn = pool.get().unwrap();
        let _ = TaskService::add_task(&conn, "open", Priority::Medium).unwrap();
        drop(conn);

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let notifier = Notifier::new(
            pool,
            make_mailer(server.uri()),
            vec!["bogus".to_string(), String::new()],
        );
        let outcome = notifier.run().await.unwrap();
        assert!(matches!(outcome, DigestOutcome::NoValidRecipients));
    }

    #[tokio::test]
    async fn per_recipient_failure_does_not_abort_remaining_sends() {
        let dir = tempfile::tempdir().unwrap();
        let pool = make_pool(&dir);
        let conn = pool.get().unwrap();
        let _ = TaskService::add_task(&conn, "open", Priority::Medium).unwrap();
        drop(conn);

        let server = MockServer::start().await;
        // First recipient is rejected, second accepted
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({"to": ["bad@x.com"]})))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"message": "address suppressed"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({"to": ["ok@x.com"]})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message_id": "m-2"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let notifier = Notifier::new(
            pool,
            make_mailer(server.uri()),
            vec!["bad@x.com".to_string(), "ok@x.com".to_string()],
        );
        let outcome = notifier.run().await.unwrap();
        match outcome {
            DigestOutcome::Sent(ref results) => {
                assert_eq!(results.len(), 2);
                assert!(!results[0].success);
                assert!(results[1].success);
                let rendered = outcome.to_string();
                assert!(rendered.contains("Error sending email to bad@x.com: address suppressed"));
                assert!(rendered.contains("Email sent to ok@x.com! Message ID: m-2"));
            }
            other => panic!("expected Sent, got {other:?}"),
        }
    }
}
