use crate::common::state::AppState;
use crate::{common, pages, services};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

#[derive(OpenApi)]
#[openapi(
    paths(
        common::views::healthz,
        common::views::get_ui_config,
        pages::views::home,
        pages::views::learn,
        pages::views::rss,
        pages::views::feedback,
        services::views::browse,
        services::views::search,
        services::views::discover,
        services::views::whats_next,
        services::views::recent,
        services::views::connect,
        services::views::detail,
        services::views::mine,
        services::views::submit_form,
        services::views::submit,
        services::views::edit_form,
        services::views::edit,
    ),
    components(schemas(
        common::models::UIConfiguration,
        services::models::ServiceRead,
        services::db::ServiceStatus,
        services::forms::ServiceFormInput,
    )),
    tags((name = "service-registry", description = "Registry of services"))
)]
pub struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/healthz", get(common::views::healthz))
        .route(
            "/api/config",
            get(common::views::get_ui_config).with_state(state.clone()),
        )
        .merge(pages::views::router(state.clone()))
        .nest("/service", services::views::router(state))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
