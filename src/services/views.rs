use super::forms::{FieldErrors, ServiceFormInput};
use super::models::{
    BrowseListing, MineListing, Notice, ServiceDetail, ServiceForm, ServiceList, ServiceRead,
};
use super::services::{self, SubmitOutcome};
use crate::common::auth::CurrentUser;
use crate::common::error::AppError;
use crate::common::pagination::parse_page;
use crate::common::render::Rendered;
use crate::common::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{routing::get, Form, Router};
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info};
use utoipa::IntoParams;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/browse", get(browse))
        .route("/search", get(search))
        .route("/discover", get(discover))
        .route("/whatsnext", get(whats_next))
        .route("/recent", get(recent))
        .route("/connect", get(connect))
        .route("/mine", get(mine))
        .route("/mine/", get(mine))
        .route("/add/", get(submit_form).post(submit))
        .route("/:nickname", get(detail))
        .route("/:nickname/", get(detail))
        .route("/:nickname/edit/", get(edit_form).post(edit))
        .with_state(state)
}

const MINE_PATH: &str = "/service/mine";

fn mine_location(notice: Notice) -> String {
    format!("{}?notice={}", MINE_PATH, notice.as_param())
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct ListingParams {
    /// 1-based page number, clamped into range
    pub page: Option<String>,
    /// Substring matched against name or nickname
    pub search: Option<String>,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct MineParams {
    pub notice: Option<String>,
}

async fn listing(
    template: &'static str,
    state: &AppState,
    params: ListingParams,
) -> Result<Rendered<BrowseListing>, AppError> {
    let page = services::browse(
        &state.db,
        params.search.as_deref(),
        parse_page(params.page.as_deref()),
    )
    .await?;

    Ok(Rendered::new(
        template,
        BrowseListing {
            services: page.map(ServiceRead::from),
            search: params.search,
        },
    ))
}

#[utoipa::path(
    get,
    path = "/service/browse",
    params(ListingParams),
    responses((status = OK, body = [ServiceRead]))
)]
pub async fn browse(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Rendered<BrowseListing>, AppError> {
    listing("browse.html", &state, params).await
}

#[utoipa::path(
    get,
    path = "/service/search",
    params(ListingParams),
    responses((status = OK, body = [ServiceRead]))
)]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Rendered<BrowseListing>, AppError> {
    listing("search.html", &state, params).await
}

#[utoipa::path(
    get,
    path = "/service/discover",
    responses((status = OK, body = [ServiceRead]))
)]
pub async fn discover(State(state): State<AppState>) -> Result<Rendered<ServiceList>, AppError> {
    let services = services::in_development(&state.db).await?;
    Ok(Rendered::new("discover.html", services.into()))
}

#[utoipa::path(
    get,
    path = "/service/whatsnext",
    responses((status = OK, body = [ServiceRead]))
)]
pub async fn whats_next(State(state): State<AppState>) -> Result<Rendered<ServiceList>, AppError> {
    let services = services::in_development(&state.db).await?;
    Ok(Rendered::new("whatsnext.html", services.into()))
}

#[utoipa::path(
    get,
    path = "/service/recent",
    responses((status = OK, body = [ServiceRead]))
)]
pub async fn recent(State(state): State<AppState>) -> Result<Rendered<ServiceList>, AppError> {
    let services = services::recently_modified(&state.db).await?;
    Ok(Rendered::new("recent.html", services.into()))
}

#[utoipa::path(
    get,
    path = "/service/connect",
    responses((status = SEE_OTHER, description = "Redirects to the browse listing"))
)]
pub async fn connect() -> Redirect {
    Redirect::to("/service/browse")
}

#[utoipa::path(
    get,
    path = "/service/{nickname}/",
    params(("nickname" = String, Path, description = "Service nickname, any case")),
    responses(
        (status = OK, body = ServiceRead),
        (status = NOT_FOUND, description = "No approved service with this nickname")
    )
)]
pub async fn detail(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> Result<Rendered<ServiceDetail>, AppError> {
    let service = services::find_approved(&state.db, &nickname)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Rendered::new(
        "service.html",
        ServiceDetail {
            service: service.into(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/service/mine",
    params(MineParams),
    responses(
        (status = OK, body = [ServiceRead]),
        (status = UNAUTHORIZED)
    )
)]
pub async fn mine(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<MineParams>,
) -> Result<Rendered<MineListing>, AppError> {
    let services = services::owned_by(&state.db, &user.username).await?;
    let notice = params
        .notice
        .as_deref()
        .and_then(Notice::from_param)
        .map(Notice::message);

    Ok(Rendered::new(
        "mine.html",
        MineListing {
            services: services.into_iter().map(ServiceRead::from).collect(),
            notice,
        },
    ))
}

fn form_page(
    form: ServiceFormInput,
    errors: FieldErrors,
    editing: Option<String>,
) -> Rendered<ServiceForm> {
    Rendered::new(
        "submit.html",
        ServiceForm {
            form,
            errors,
            editing,
        },
    )
}

#[utoipa::path(
    get,
    path = "/service/add/",
    responses((status = OK, description = "Empty submission form"), (status = UNAUTHORIZED))
)]
pub async fn submit_form(_user: CurrentUser) -> Rendered<ServiceForm> {
    form_page(ServiceFormInput::default(), FieldErrors::default(), None)
}

#[utoipa::path(
    post,
    path = "/service/add/",
    request_body(content = ServiceFormInput, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = SEE_OTHER, description = "Submitted, redirects to the owner's listing"),
        (status = OK, description = "Form re-rendered with field errors"),
        (status = UNAUTHORIZED)
    )
)]
pub async fn submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let input: ServiceFormInput = fields.into_iter().collect();
    let new = match input.validate_new() {
        Ok(new) => new,
        Err(errors) => return Ok(form_page(input, errors, None).into_response()),
    };

    let now = Utc::now().naive_utc();
    let service = match services::create(&state.db, new, &user.username, now).await? {
        SubmitOutcome::Created(service) => service,
        SubmitOutcome::NicknameTaken => {
            let mut errors = FieldErrors::default();
            errors.add("nickname", "A service with this nickname already exists.");
            return Ok(form_page(input, errors, None).into_response());
        }
    };
    info!(
        nickname = %service.nickname,
        owner = %service.owner,
        contact = user.email.as_deref().unwrap_or("-"),
        "service submitted"
    );

    // Best effort, a failed notification never fails the submission
    if let Err(err) = state.notifier.notify_submission(&service).await {
        error!(error = %err, nickname = %service.nickname, "could not notify administrators");
    }

    Ok(Redirect::to(&mine_location(Notice::Submitted)).into_response())
}

#[utoipa::path(
    get,
    path = "/service/{nickname}/edit/",
    params(("nickname" = String, Path, description = "Nickname of a service you own")),
    responses(
        (status = OK, description = "Form populated with the current listing"),
        (status = NOT_FOUND),
        (status = UNAUTHORIZED)
    )
)]
pub async fn edit_form(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(nickname): Path<String>,
) -> Result<Rendered<ServiceForm>, AppError> {
    let service = services::find_owned(&state.db, &user.username, &nickname)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(form_page(
        ServiceFormInput::from(&service),
        FieldErrors::default(),
        Some(service.nickname),
    ))
}

#[utoipa::path(
    post,
    path = "/service/{nickname}/edit/",
    params(("nickname" = String, Path, description = "Nickname of a service you own")),
    request_body(content = ServiceFormInput, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = SEE_OTHER, description = "Updated, redirects to the owner's listing"),
        (status = OK, description = "Form re-rendered with field errors"),
        (status = NOT_FOUND),
        (status = UNAUTHORIZED)
    )
)]
pub async fn edit(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(nickname): Path<String>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let service = services::find_owned(&state.db, &user.username, &nickname)
        .await?
        .ok_or(AppError::NotFound)?;

    let input: ServiceFormInput = fields.into_iter().collect();

    let changes = match input.validate_changes() {
        Ok(changes) => changes,
        Err(errors) => {
            let form = ServiceFormInput {
                nickname: service.nickname.clone(),
                ..input
            };
            return Ok(form_page(form, errors, Some(service.nickname)).into_response());
        }
    };

    let updated = services::update(&state.db, service, changes, Utc::now().naive_utc()).await?;
    info!(nickname = %updated.nickname, owner = %updated.owner, "service updated");

    Ok(Redirect::to(&mine_location(Notice::Updated)).into_response())
}
