use crate::common::state::AppState;
use crate::config::Config;
use crate::external::email::services::{EmailError, SubmissionNotifier};
use crate::external::feedback::services::WidgetClient;
use crate::services::db::{ActiveModel, Model, ServiceStatus};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::Response;
use axum::Router;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use jsonwebtoken::{encode, EncodingKey, Header};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection};
use secrecy::Secret;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::auth::Claims;

pub const TEST_SECRET: &str = "registry-test-secret";

pub fn token_for(username: &str) -> String {
    let claims = Claims {
        sub: username.to_string(),
        email: Some(format!("{username}@example.org")),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn test_config() -> Config {
    Config {
        db_url: "sqlite::memory:".to_string(),
        jwt_secret: Secret::new(TEST_SECRET.to_string()),
        feedback_widget_url: "http://127.0.0.1:9/widget".to_string(),
        rss_feed_url: "https://news.example.org/registry.xml".to_string(),
        rss_feed_title: "Registry updates".to_string(),
        mail_relay_url: None,
        mail_from: "registry@example.org".to_string(),
        admin_emails: vec!["mods@example.org".to_string()],
        outbound_timeout_secs: 5,
        bind_address: "127.0.0.1:0".to_string(),
        log_level: "debug".to_string(),
    }
}

/// A migrated in-memory database. One connection, or every query would
/// see its own empty database.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

/// Records notified nicknames, optionally failing every call.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl SubmissionNotifier for RecordingNotifier {
    async fn notify_submission(&self, service: &Model) -> Result<(), EmailError> {
        if self.fail {
            return Err(EmailError::NotConfigured);
        }
        self.sent.lock().unwrap().push(service.nickname.clone());
        Ok(())
    }
}

pub async fn test_state(notifier: Arc<RecordingNotifier>) -> AppState {
    let config = test_config();
    let feedback = WidgetClient::new(reqwest::Client::new(), config.feedback_widget_url.clone());
    AppState {
        db: test_db().await,
        config: Arc::new(config),
        notifier,
        feedback: Arc::new(feedback),
    }
}

/// Fixed timestamps, `minutes` after a reference instant.
pub fn at(minutes: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|date| date.and_hms_opt(9, 0, 0))
        .unwrap()
        + Duration::minutes(minutes)
}

pub struct SeedService {
    pub owner: String,
    pub nickname: String,
    pub name: String,
    pub status: ServiceStatus,
    pub in_development: bool,
    pub submitted: NaiveDateTime,
    pub modified: NaiveDateTime,
}

impl SeedService {
    pub fn approved(owner: &str, nickname: &str) -> Self {
        Self {
            owner: owner.to_string(),
            nickname: nickname.to_string(),
            name: nickname.to_string(),
            status: ServiceStatus::Approved,
            in_development: false,
            submitted: at(0),
            modified: at(0),
        }
    }
}

pub fn sample_service(owner: &str, nickname: &str) -> Model {
    Model {
        id: Uuid::new_v4(),
        name: format!("{nickname} service"),
        nickname: nickname.to_string(),
        summary: "A service used in tests".to_string(),
        description: None,
        url: None,
        in_development: false,
        status: ServiceStatus::Submitted,
        owner: owner.to_string(),
        date_submitted: at(0),
        date_modified: at(0),
    }
}

pub async fn seed(db: &DatabaseConnection, seed: SeedService) -> Model {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(seed.name),
        nickname: Set(seed.nickname),
        summary: Set("Seeded for tests".to_string()),
        description: Set(None),
        url: Set(None),
        in_development: Set(seed.in_development),
        status: Set(seed.status),
        owner: Set(seed.owner),
        date_submitted: Set(seed.submitted),
        date_modified: Set(seed.modified),
    }
    .insert(db)
    .await
    .unwrap()
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{address}")
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
