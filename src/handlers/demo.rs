//! Small endpoints showing HTTP mechanics: methods and status codes, path and
//! query parameters, raw bodies, content negotiation and cookies.

use crate::error::ApiError;
use crate::schemas::ErrorResponse;
use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_cookies::{Cookie, Cookies};
use tracing::{debug, instrument, warn};
use utoipa::IntoParams;

/// Name of the cookie set by [`cookie_demo`]
pub const DEMO_COOKIE: &str = "cookie";
const DEMO_COOKIE_VALUE: &str = "cookieValue";

/// Query parameters for the query demo. Both are required.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "demo",
    responses((status = 200, description = "Greeting", body = String, content_type = "text/plain"))
)]
pub async fn hello_get() -> &'static str {
    "Hello, world from a GET request method with a `HttpStatus.OK` response status!"
}

#[utoipa::path(
    post,
    path = "/",
    tag = "demo",
    responses((status = 201, description = "Greeting", body = String, content_type = "text/plain"))
)]
pub async fn hello_post() -> (StatusCode, &'static str) {
    (
        StatusCode::CREATED,
        "Hello, world from a POST request method with a `HttpStatus.CREATED` response status!",
    )
}

#[utoipa::path(
    patch,
    path = "/",
    tag = "demo",
    responses((status = 200, description = "Greeting", body = String, content_type = "text/plain"))
)]
pub async fn hello_patch() -> (StatusCode, &'static str) {
    (
        StatusCode::OK,
        "Hello, world from a PATCH request method with a `HttpStatus.OK` response status!",
    )
}

/// Replies 204, so the greeting is never sent.
#[utoipa::path(
    delete,
    path = "/",
    tag = "demo",
    responses((status = 204, description = "No content"))
)]
pub async fn hello_delete() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/path-parameter-demo/{path_parameter}",
    tag = "demo",
    params(("path_parameter" = String, Path, description = "Any value")),
    responses((status = 200, description = "Echo of the path parameter", body = String, content_type = "text/plain"))
)]
#[instrument]
pub async fn path_parameter_demo(Path(path_parameter): Path<String>) -> String {
    format!("You just called `/path-parameter-demo` with path parameter '{path_parameter}'!")
}

#[utoipa::path(
    get,
    path = "/query-parameters-demo",
    tag = "demo",
    params(NameQuery),
    responses(
        (status = 200, description = "Greeting using both names", body = String, content_type = "text/plain"),
        (status = 400, description = "A name is missing", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn query_parameters_demo(Query(query): Query<NameQuery>) -> Result<String, ApiError> {
    match (query.first_name, query.last_name) {
        (Some(first_name), Some(last_name)) => Ok(format!("Hello, {first_name} {last_name}!")),
        _ => {
            warn!("Query demo called without firstName and lastName");
            Err(ApiError::BadRequest(
                "query parameters 'firstName' and 'lastName' are required".to_string(),
            ))
        }
    }
}

#[utoipa::path(
    post,
    path = "/body-demo",
    tag = "demo",
    request_body(content = String, content_type = "text/plain"),
    responses((status = 200, description = "Echo of the body", body = String, content_type = "text/plain"))
)]
#[instrument(skip(body), fields(len = body.len()))]
pub async fn body_demo(body: String) -> String {
    format!("You just called `/body-demo` with data '{body}'!")
}

/// Picks HTML or plain text from the `Accept` header.
#[utoipa::path(
    get,
    path = "/content-negotiation-demo",
    tag = "demo",
    responses(
        (status = 200, description = "Greeting as HTML or plain text", body = String),
        (status = 400, description = "No Accept header", body = ErrorResponse),
        (status = 406, description = "Neither text/html nor text/plain accepted", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn content_negotiation_demo(headers: HeaderMap) -> Result<Response, ApiError> {
    let accept = headers
        .get(header::ACCEPT)
        .ok_or_else(|| ApiError::BadRequest("missing Accept header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::BadRequest("Accept header is not valid text".to_string()))?;
    debug!("Accept: {}", accept);

    if accept.contains("text/html") {
        Ok(Html("<h1>Hello, world!</h1>").into_response())
    } else if accept.contains("text/plain") {
        Ok("Hello, world!".into_response())
    } else {
        Err(ApiError::NotAcceptable)
    }
}

/// Sets a cookie on the first call and echoes it back afterwards.
#[utoipa::path(
    get,
    path = "/cookie-demo",
    tag = "demo",
    responses((status = 200, description = "Cookie set or echoed", body = String, content_type = "text/plain"))
)]
#[instrument(skip(cookies))]
pub async fn cookie_demo(cookies: Cookies) -> String {
    match cookies.get(DEMO_COOKIE) {
        Some(cookie) => format!("You just called `/cookie-demo` with cookie '{}'!", cookie.value()),
        None => {
            cookies.add(Cookie::new(DEMO_COOKIE, DEMO_COOKIE_VALUE));
            "You just called `/cookie-demo` without a cookie. A cookie is now set!".to_string()
        }
    }
}
