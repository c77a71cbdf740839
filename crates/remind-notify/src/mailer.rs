//! Transactional-mail HTTP client.
//!
//! Sends one message per recipient through a bearer-authenticated JSON API
//! (`POST {endpoint}/v1/outbound-emails`). Transport errors and non-2xx
//! responses are captured in the per-send [`SendResult`], never panics.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use remind_settings::MailSettings;

use crate::errors::NotifyError;

/// Request timeout for a single send.
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved mailer configuration.
#[derive(Clone, Debug)]
pub struct MailerConfig {
    /// Mail API base URL.
    pub endpoint: String,
    /// Bearer token.
    pub api_token: String,
    /// Verified sender address.
    pub sender: String,
}

impl MailerConfig {
    /// Build from settings. Fails when the sender or token is missing.
    pub fn from_settings(mail: &MailSettings) -> Result<Self, NotifyError> {
        let api_token = mail
            .api_token
            .clone()
            .ok_or(NotifyError::Config("mail API token not set"))?;
        let sender = mail
            .sender
            .clone()
            .ok_or(NotifyError::Config("sender address not set"))?;
        Ok(Self {
            endpoint: mail.endpoint_url(),
            api_token,
            sender,
        })
    }
}

/// A composed message, ready to send to one recipient.
#[derive(Clone, Debug)]
pub struct OutboundEmail {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body_text: String,
    /// HTML body.
    pub body_html: String,
}

/// Outcome of a single send attempt.
#[derive(Clone, Debug, Serialize)]
pub struct SendResult {
    /// Whether the provider accepted the message.
    pub success: bool,
    /// The recipient address.
    pub recipient: String,
    /// Provider-assigned message id on success.
    pub message_id: Option<String>,
    /// HTTP status code, when a response was received.
    pub status_code: Option<u16>,
    /// Error description on failure.
    pub error: Option<String>,
}

/// Wire format of the send request.
#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

/// Wire format of the provider's success response.
#[derive(Deserialize)]
struct SendResponse {
    message_id: String,
}

/// Mail client for the digest.
pub struct Mailer {
    config: MailerConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailer")
            .field("endpoint", &self.config.endpoint)
            .field("sender", &self.config.sender)
            .finish_non_exhaustive()
    }
}

impl Mailer {
    /// Create a new mailer from resolved config.
    pub fn new(config: MailerConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::ClientBuild(e.to_string()))?;

        info!(endpoint = %config.endpoint, sender = %config.sender, "mailer initialized");

        Ok(Self { config, client })
    }

    /// The configured sender address.
    pub fn sender(&self) -> &str {
        &self.config.sender
    }

    /// Send one message to one recipient.
    pub async fn send(&self, recipient: &str, email: &OutboundEmail) -> SendResult {
        let url = format!("{}/v1/outbound-emails", self.config.endpoint);
        let request = SendRequest {
            from: &self.config.sender,
            to: vec![recipient],
            subject: &email.subject,
            text: &email.body_text,
            html: &email.body_html,
        };

        let result = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_token)
            .json(&request)
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                if response.status().is_success() {
                    let message_id = response
                        .json::<SendResponse>()
                        .await
                        .ok()
                        .map(|r| r.message_id);
                    info!(recipient, status, message_id = ?message_id, "email sent");
                    SendResult {
                        success: true,
                        recipient: recipient.to_string(),
                        message_id,
                        status_code: Some(status),
                        error: None,
                    }
                } else {
                    let body = response.text().await.unwrap_or_default();
                    let message = serde_json::from_str::<serde_json::Value>(&body)
                        .ok()
                        .and_then(|v| v.get("message")?.as_str().map(String::from))
                        .unwrap_or(body);
                    warn!(recipient, status, error = %message, "email send failed");
                    SendResult {
                        success: false,
                        recipient: recipient.to_string(),
                        message_id: None,
                        status_code: Some(status),
                        error: Some(message),
                    }
                }
            }
            Err(e) => {
                warn!(recipient, error = %e, "email send failed (transport error)");
                SendResult {
                    success: false,
                    recipient: recipient.to_string(),
                    message_id: None,
                    status_code: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_email() -> OutboundEmail {
        OutboundEmail {
            subject: "Daily Task Reminder".to_string(),
            body_text: "text".to_string(),
            body_html: "<p>html</p>".to_string(),
        }
    }

    fn make_mailer(endpoint: String) -> Mailer {
        Mailer::new(MailerConfig {
            endpoint,
            api_token: "token-123".to_string(),
            sender: "reminder@example.com".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn config_requires_token() {
        let mail = MailSettings {
            sender: Some("a@b.com".to_string()),
            ..Default::default()
        };
        let err = MailerConfig::from_settings(&mail).unwrap_err();
        assert!(err.to_string().contains("token"));
    }

    #[test]
    fn config_requires_sender() {
        let mail = MailSettings {
            api_token: Some("t".to_string()),
            ..Default::default()
        };
        let err = MailerConfig::from_settings(&mail).unwrap_err();
        assert!(err.to_string().contains("sender"));
    }

    #[test]
    fn config_from_complete_settings() {
        let mail = MailSettings {
            region: "eu-west-1".to_string(),
            api_token: Some("t".to_string()),
            sender: Some("a@b.com".to_string()),
            ..Default::default()
        };
        let config = MailerConfig::from_settings(&mail).unwrap();
        assert_eq!(config.endpoint, "https://email.eu-west-1.amazonaws.com");
        assert_eq!(config.sender, "a@b.com");
    }

    #[tokio::test]
    async fn send_success_captures_message_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/outbound-emails"))
            .and(header("authorization", "Bearer token-123"))
            .and(body_partial_json(serde_json::json!({
                "from": "reminder@example.com",
                "to": ["a@x.com"],
                "subject": "Daily Task Reminder",
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message_id": "msg-42"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mailer = make_mailer(server.uri());
        let result = mailer.send("a@x.com", &make_email()).await;
        assert!(result.success);
        assert_eq!(result.message_id.as_deref(), Some("msg-42"));
        assert_eq!(result.status_code, Some(200));
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn send_failure_captures_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/outbound-emails"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"message": "address not verified"})),
            )
            .mount(&server)
            .await;

        let mailer = make_mailer(server.uri());
        let result = mailer.send("a@x.com", &make_email()).await;
        assert!(!result.success);
        assert_eq!(result.status_code, Some(400));
        assert_eq!(result.error.as_deref(), Some("address not verified"));
    }

    #[tokio::test]
    async fn send_transport_error_is_captured() {
        // Point at a closed port — the connection is refused.
        let mailer = make_mailer("http://127.0.0.1:1".to_string());
        let result = mailer.send("a@x.com", &make_email()).await;
        assert!(!result.success);
        assert!(result.status_code.is_none());
        assert!(result.error.is_some());
    }
}
