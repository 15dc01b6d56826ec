use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sea_orm::DbErr;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,
    #[error("Authentication required")]
    Unauthorized,
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("upstream service failed: {0}")]
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Json("Not found".to_string())).into_response()
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json("Authentication required".to_string()),
            )
                .into_response(),
            AppError::Database(err) => {
                error!(error = %err, "database query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json("Internal server error".to_string()),
                )
                    .into_response()
            }
            AppError::Upstream(msg) => {
                error!(error = %msg, "upstream call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json("Internal server error".to_string()),
                )
                    .into_response()
            }
        }
    }
}
