use crate::common::pagination::PAGE_SIZE;
use crate::config::Config;
use serde::Serialize;
use utoipa::ToSchema;

/// Settings the web front end needs to render its pages.
#[derive(ToSchema, Serialize, Debug)]
pub struct UIConfiguration {
    pub feedback_widget_url: String,
    pub rss_feed_url: String,
    pub page_size: u64,
}

impl UIConfiguration {
    pub fn new(config: &Config) -> Self {
        Self {
            feedback_widget_url: config.feedback_widget_url.clone(),
            rss_feed_url: config.rss_feed_url.clone(),
            page_size: PAGE_SIZE,
        }
    }
}
