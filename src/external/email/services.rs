use super::models::AdminNotification;
use crate::services::db::Model as Service;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("no mail relay is configured")]
    NotConfigured,
    #[error("mail relay request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Tells the moderators that a listing is waiting for them.
#[async_trait]
pub trait SubmissionNotifier: Send + Sync {
    async fn notify_submission(&self, service: &Service) -> Result<(), EmailError>;
}

pub struct MailRelayNotifier {
    client: reqwest::Client,
    relay_url: Option<String>,
    from: String,
    admins: Vec<String>,
}

impl MailRelayNotifier {
    pub fn new(
        client: reqwest::Client,
        relay_url: Option<String>,
        from: String,
        admins: Vec<String>,
    ) -> Self {
        Self {
            client,
            relay_url,
            from,
            admins,
        }
    }
}

#[async_trait]
impl SubmissionNotifier for MailRelayNotifier {
    async fn notify_submission(&self, service: &Service) -> Result<(), EmailError> {
        if self.admins.is_empty() {
            debug!(nickname = %service.nickname, "no administrators to notify");
            return Ok(());
        }
        let relay_url = self.relay_url.as_deref().ok_or(EmailError::NotConfigured)?;

        let message = AdminNotification::for_submission(service, &self.from, &self.admins);
        self.client
            .post(relay_url)
            .json(&message)
            .send()
            .await?
            .error_for_status()?;

        info!(
            nickname = %service.nickname,
            recipients = self.admins.len(),
            "moderation email sent"
        );
        Ok(())
    }
}
