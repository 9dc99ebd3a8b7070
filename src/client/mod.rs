//! Relay client: sends one notification to a remote relay server and
//! records the outcome in the audit log.

mod target;

use std::fmt;
use std::time::Duration;

use log::{info, warn};
use reqwest::{StatusCode, Url};
use thiserror::Error;

use crate::audit::AuditLog;
use crate::models::acknowledgement::Acknowledgement;
use crate::models::notification_payload::NotificationPayload;
use crate::models::sent_notification::NewSentNotification;

pub use target::{normalize_target, TargetError, NOTIFY_PATH};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid target: {0}")]
    Target(#[from] TargetError),

    #[error("Error creating HTTP client: {0}")]
    Build(reqwest::Error),

    #[error("Error sending notification: {0}")]
    Request(reqwest::Error),

    #[error("Error reading response: {0}")]
    ReadBody(reqwest::Error),
}

/// Result of a single [`RelayClient::send`] call.
///
/// Transport status and the acknowledgement's `success` flag are independent:
/// a non-2xx reply that still decodes is an `Acknowledged` outcome.
#[derive(Debug)]
pub enum SendOutcome {
    Acknowledged {
        url: Url,
        status: StatusCode,
        ack: Acknowledgement,
    },
    Unreadable {
        url: Url,
        status: StatusCode,
        error: String,
        body: String,
    },
    Transport(ClientError),
}

impl SendOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SendOutcome::Acknowledged { ack, .. } if ack.success)
    }

    /// HTTP status, if any response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SendOutcome::Acknowledged { status, .. } | SendOutcome::Unreadable { status, .. } => Some(*status),
            SendOutcome::Transport(_) => None,
        }
    }

    fn response_message(&self) -> String {
        match self {
            SendOutcome::Acknowledged { ack, .. } => ack.message.clone(),
            SendOutcome::Unreadable { error, body, .. } => {
                format!("Could not parse response JSON: {}; raw response: {}", error, body)
            }
            SendOutcome::Transport(e) => e.to_string(),
        }
    }
}

impl fmt::Display for SendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendOutcome::Acknowledged { ack, .. } if ack.success => {
                write!(f, "Notification sent successfully! Server time: {}", ack.time.to_rfc3339())?
            }
            SendOutcome::Acknowledged { ack, .. } => write!(f, "Notification failed: {}", ack.message)?,
            SendOutcome::Unreadable { error, body, .. } => {
                write!(f, "Warning: Could not parse response JSON: {}\nRaw response: {}", error, body)?
            }
            SendOutcome::Transport(e) => write!(f, "{}", e)?,
        }

        match self.status() {
            Some(status) if !status.is_success() => {
                write!(f, "\nServer returned status code: {}", status.as_u16())
            }
            _ => Ok(()),
        }
    }
}

pub struct RelayClient {
    http: reqwest::Client,
    audit: AuditLog,
}

impl RelayClient {
    pub fn new(timeout: Duration, audit: AuditLog) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(RelayClient { http, audit })
    }

    /// Sends one notification to `target` and writes exactly one sent record,
    /// whatever the outcome. Never retries.
    pub async fn send(&self, target: &str, title: &str, message: &str, icon: Option<&str>) -> SendOutcome {
        let payload = NotificationPayload::new(title, message, icon);

        let outcome = match normalize_target(target) {
            Ok(url) => self.post(url, &payload).await,
            Err(e) => SendOutcome::Transport(e.into()),
        };

        if let Some(status) = outcome.status().filter(|status| !status.is_success()) {
            warn!("Server returned status code: {}", status.as_u16());
        }

        self.audit
            .record_sent(NewSentNotification {
                target: target.to_string(),
                title: payload.title,
                message: payload.message,
                icon: payload.icon,
                success: outcome.is_success(),
                response_message: Some(outcome.response_message()),
                sent_at: chrono::Utc::now().naive_utc(),
            })
            .await;

        outcome
    }

    async fn post(&self, url: Url, payload: &NotificationPayload) -> SendOutcome {
        info!("Sending notification to {}", url);

        let response = match self.http.post(url.clone()).json(payload).send().await {
            Ok(response) => response,
            Err(e) => return SendOutcome::Transport(ClientError::Request(e)),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return SendOutcome::Transport(ClientError::ReadBody(e)),
        };

        match serde_json::from_str::<Acknowledgement>(&body) {
            Ok(ack) => SendOutcome::Acknowledged { url, status, ack },
            Err(e) => {
                warn!("Could not parse response JSON: {}", e);
                warn!("Raw response: {}", body);
                SendOutcome::Unreadable {
                    url,
                    status,
                    error: e.to_string(),
                    body,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn url() -> Url {
        normalize_target("localhost:8080").unwrap()
    }

    fn time() -> chrono::DateTime<chrono::FixedOffset> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00+00:00").unwrap()
    }

    #[test]
    fn success_outcome_mentions_server_time() {
        let outcome = SendOutcome::Acknowledged {
            url: url(),
            status: StatusCode::OK,
            ack: Acknowledgement::displayed(time()),
        };

        assert!(outcome.is_success());
        assert_eq!(
            outcome.to_string(),
            "Notification sent successfully! Server time: 2024-05-01T12:00:00+00:00"
        );
    }

    #[test]
    fn failed_ack_reports_server_message_and_status() {
        let outcome = SendOutcome::Acknowledged {
            url: url(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            ack: Acknowledgement::failed("no daemon", time()),
        };

        assert!(!outcome.is_success());
        assert_eq!(
            outcome.to_string(),
            "Notification failed: Failed to display notification: no daemon\nServer returned status code: 500"
        );
    }

    #[test]
    fn non_2xx_is_surfaced_even_when_ack_claims_success() {
        let outcome = SendOutcome::Acknowledged {
            url: url(),
            status: StatusCode::ACCEPTED,
            ack: Acknowledgement::displayed(time()),
        };
        assert!(!outcome.to_string().contains("status code"));

        let outcome = SendOutcome::Acknowledged {
            url: url(),
            status: StatusCode::BAD_GATEWAY,
            ack: Acknowledgement::displayed(time()),
        };
        assert!(outcome.is_success());
        assert!(outcome.to_string().ends_with("Server returned status code: 502"));
    }

    #[test]
    fn unreadable_reply_keeps_raw_body() {
        let outcome = SendOutcome::Unreadable {
            url: url(),
            status: StatusCode::BAD_REQUEST,
            error: "expected value at line 1 column 1".to_string(),
            body: "Both title and message are required".to_string(),
        };

        assert!(!outcome.is_success());
        let text = outcome.to_string();
        assert!(text.starts_with("Warning: Could not parse response JSON"));
        assert!(text.contains("Raw response: Both title and message are required"));
        assert!(outcome.response_message().contains("Both title and message are required"));
    }

    #[test]
    fn invalid_target_is_a_transport_failure() {
        let outcome = SendOutcome::Transport(TargetError::Empty.into());

        assert!(!outcome.is_success());
        assert_eq!(outcome.status(), None);
        assert_eq!(outcome.to_string(), "Invalid target: target address is empty");
    }
}
