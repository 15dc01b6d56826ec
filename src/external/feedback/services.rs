use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("feedback widget request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[async_trait]
pub trait FeedbackSource: Send + Sync {
    async fn fetch(&self) -> Result<Value, FeedbackError>;
}

/// Reads the widget payload from the external feedback service.
pub struct WidgetClient {
    client: reqwest::Client,
    url: String,
}

impl WidgetClient {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl FeedbackSource for WidgetClient {
    async fn fetch(&self) -> Result<Value, FeedbackError> {
        let data = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(data)
    }
}
