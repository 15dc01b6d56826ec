use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// A view model tagged with the template that presents it.
#[derive(Serialize, Debug)]
pub struct Rendered<T: Serialize> {
    pub template: &'static str,
    pub context: T,
}

impl<T: Serialize> Rendered<T> {
    pub fn new(template: &'static str, context: T) -> Self {
        Self { template, context }
    }
}

impl<T: Serialize> IntoResponse for Rendered<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Marks a response as uncacheable for browsers and shared proxies.
pub fn never_cache(response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("max-age=0, no-cache, no-store, must-revalidate, private"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    response
}
