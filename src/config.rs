use anyhow::{Context, Result};
use dotenvy::dotenv;
use secrecy::Secret;
use std::env;

#[derive(Debug)]
pub struct Config {
    pub db_url: String,
    pub jwt_secret: Secret<String>,
    pub feedback_widget_url: String,
    pub rss_feed_url: String,
    pub rss_feed_title: String,
    pub mail_relay_url: Option<String>,
    pub mail_from: String,
    pub admin_emails: Vec<String>,
    pub outbound_timeout_secs: u64,
    pub bind_address: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load from .env file if available

        let db_url = match env::var("DB_URL") {
            Ok(url) => url,
            Err(_) => form_db_url()?,
        };

        Ok(Config {
            db_url,
            jwt_secret: Secret::new(required("JWT_SECRET")?),
            feedback_widget_url: required("FEEDBACK_WIDGET_URL")?,
            rss_feed_url: required("RSS_FEED_URL")?,
            rss_feed_title: env::var("RSS_FEED_TITLE")
                .unwrap_or_else(|_| "Registry updates".to_string()),
            mail_relay_url: env::var("MAIL_RELAY_URL").ok().filter(|url| !url.is_empty()),
            mail_from: env::var("MAIL_FROM").unwrap_or_else(|_| "registry@localhost".to_string()),
            admin_emails: parse_admin_emails(&env::var("ADMIN_EMAILS").unwrap_or_default()),
            outbound_timeout_secs: match env::var("OUTBOUND_TIMEOUT_SECS") {
                Ok(value) => value
                    .parse()
                    .context("OUTBOUND_TIMEOUT_SECS must be a whole number of seconds")?,
                Err(_) => 10,
            },
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{} must be set", key))
}

fn form_db_url() -> Result<String> {
    let prefix = env::var("DB_PREFIX").unwrap_or_else(|_| "postgres".to_string());
    let port: u16 = env::var("DB_PORT")
        .unwrap_or_else(|_| "5432".to_string())
        .parse()
        .context("DB_PORT must be a port number")?;

    Ok(format!(
        "{}://{}:{}@{}:{}/{}",
        prefix,
        required("DB_USER")?,
        required("DB_PASSWORD")?,
        required("DB_HOST")?,
        port,
        required("DB_NAME")?,
    ))
}

pub(crate) fn parse_admin_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .collect()
}
