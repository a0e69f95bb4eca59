//! Notification delivery
//!
//! Notifications leave the system through a single `Notifier` seam. The
//! production implementation POSTs JSON to a configured webhook endpoint;
//! when no endpoint is configured a logging fallback is used so the rest
//! of the workflow behaves identically in development.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    config::NotificationConfig,
    error::{AppError, AppResult},
    models::Milestone,
};

/// A notification ready for delivery
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub recipient_email: String,
    pub recipient_name: String,
    pub kind: NotificationKind,
    pub tournament_id: Uuid,
    pub tournament_name: String,
    pub body: String,
}

/// What triggered the notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    PaymentApproved,
    PaymentRejected,
    Reminder(Milestone),
    TournamentCancelled,
}

/// Outbound notification gateway
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> AppResult<()>;
}

/// Delivers notifications as JSON POSTs to a webhook endpoint
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: String, config: &NotificationConfig) -> Self {
        Self {
            url,
            client: reqwest::Client::builder()
                .timeout(config.send_timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, notification: &Notification) -> AppResult<()> {
        let response = self
            .client
            .post(&self.url)
            .json(notification)
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Notification delivery failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Notification endpoint returned {}",
                response.status()
            )));
        }

        tracing::debug!(
            recipient = %notification.recipient_email,
            kind = ?notification.kind,
            "Notification delivered"
        );

        Ok(())
    }
}

/// Logs notifications instead of delivering them
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> AppResult<()> {
        tracing::info!(
            recipient = %notification.recipient_email,
            kind = ?notification.kind,
            tournament = %notification.tournament_name,
            body = %notification.body,
            "Notification (log-only delivery)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification() -> Notification {
        Notification {
            recipient_email: "player@example.com".to_string(),
            recipient_name: "Player".to_string(),
            kind: NotificationKind::PaymentApproved,
            tournament_id: Uuid::new_v4(),
            tournament_name: "Friday Night Cup".to_string(),
            body: "Your payment was verified.".to_string(),
        }
    }

    #[test]
    fn test_log_notifier_always_succeeds() {
        let result = tokio_test::block_on(LogNotifier.send(&notification()));
        assert!(result.is_ok());
    }

    #[test]
    fn test_mock_notifier_records_calls() {
        let mut mock = MockNotifier::new();
        mock.expect_send().times(1).returning(|_| Ok(()));

        let result = tokio_test::block_on(mock.send(&notification()));
        assert!(result.is_ok());
    }
}
