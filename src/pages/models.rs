use crate::services::models::ServiceRead;
use serde::Serialize;

#[derive(Serialize)]
pub struct HomePage {
    pub latest: Vec<ServiceRead>,
}

#[derive(Serialize)]
pub struct RssFeed {
    pub title: String,
    pub feed_url: String,
}

#[derive(Serialize)]
pub struct LearnPage {}
