use super::models::{HomePage, LearnPage, RssFeed};
use crate::common::error::AppError;
use crate::common::render::{never_cache, Rendered};
use crate::common::state::AppState;
use crate::external::feedback::models::FeedbackWidget;
use crate::services::models::ServiceRead;
use crate::services::services;
use axum::extract::State;
use axum::response::Response;
use axum::{routing::get, Router};

const HOME_LISTING_SIZE: u64 = 10;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/learn", get(learn))
        .route("/rss", get(rss))
        .route("/feedback", get(feedback))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = OK, body = [ServiceRead]))
)]
pub async fn home(State(state): State<AppState>) -> Result<Rendered<HomePage>, AppError> {
    let latest = services::latest_submitted(&state.db, HOME_LISTING_SIZE).await?;
    Ok(Rendered::new(
        "home.html",
        HomePage {
            latest: latest.into_iter().map(ServiceRead::from).collect(),
        },
    ))
}

#[utoipa::path(get, path = "/learn", responses((status = OK)))]
pub async fn learn() -> Rendered<LearnPage> {
    Rendered::new("learn.html", LearnPage {})
}

#[utoipa::path(get, path = "/rss", responses((status = OK)))]
pub async fn rss(State(state): State<AppState>) -> Response {
    never_cache(Rendered::new(
        "rss.html",
        RssFeed {
            title: state.config.rss_feed_title.clone(),
            feed_url: state.config.rss_feed_url.clone(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/feedback",
    responses(
        (status = OK, description = "Feedback widget data"),
        (status = INTERNAL_SERVER_ERROR, description = "Feedback service unavailable")
    )
)]
pub async fn feedback(State(state): State<AppState>) -> Response {
    match state.feedback.fetch().await {
        Ok(data) => never_cache(Rendered::new("feedback.html", FeedbackWidget { data })),
        Err(err) => never_cache(AppError::Upstream(err.to_string())),
    }
}
