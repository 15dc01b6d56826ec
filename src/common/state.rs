use crate::config::Config;
use crate::external::email::services::{MailRelayNotifier, SubmissionNotifier};
use crate::external::feedback::services::{FeedbackSource, WidgetClient};
use anyhow::Result;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub notifier: Arc<dyn SubmissionNotifier>,
    pub feedback: Arc<dyn FeedbackSource>,
}

impl AppState {
    /// Wires the HTTP-backed integrations from configuration.
    pub fn from_config(db: DatabaseConnection, config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.outbound_timeout_secs))
            .build()?;

        let notifier = MailRelayNotifier::new(
            client.clone(),
            config.mail_relay_url.clone(),
            config.mail_from.clone(),
            config.admin_emails.clone(),
        );
        let feedback = WidgetClient::new(client, config.feedback_widget_url.clone());

        Ok(Self {
            db,
            config: Arc::new(config),
            notifier: Arc::new(notifier),
            feedback: Arc::new(feedback),
        })
    }
}
