use anyhow::{Context, Result};
use common::state::AppState;
use config::Config;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod external;
mod pages;
mod router;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_level)?;

    let mut options = ConnectOptions::new(config.db_url.clone());
    options.sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("could not connect to the database")?;

    Migrator::up(&db, None)
        .await
        .context("could not apply database migrations")?;
    info!("database migrations applied");

    let bind_address = config.bind_address.clone();
    let state = AppState::from_config(db, config)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("could not bind {}", bind_address))?;
    info!("listening on {}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    // RUST_LOG takes precedence over LOG_LEVEL
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid LOG_LEVEL '{}'", log_level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}
