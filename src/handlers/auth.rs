use crate::config::SessionCookieSettings;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::handlers::users::UserResponse;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use model::Credentials;
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies, cookie::SameSite};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

/// Request body for logging in
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Self {
            username: request.username,
            password: request.password,
        }
    }
}

/// Value of the session cookie on this request, if any.
fn session_token(cookies: &Cookies, settings: &SessionCookieSettings) -> Option<String> {
    cookies
        .get(&settings.name)
        .map(|cookie| cookie.value().to_string())
}

fn session_cookie(settings: &SessionCookieSettings, token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(settings.name.clone(), token);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(settings.secure);
    cookie
}

/// Log in and receive a session cookie
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, session cookie set"),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<StatusCode, ApiError> {
    trace!("Entering login function");
    let credentials = Credentials::from(request);

    let token = state.auth.login(&credentials).await?;

    // A client holds at most one session: drop the one it came in with
    if let Some(previous) = session_token(&cookies, &state.session_cookie) {
        debug!("Replacing the session presented with the login request");
        state.auth.logout(Some(previous.as_str())).await?;
    }

    cookies.add(session_cookie(&state.session_cookie, token));
    info!("Session cookie issued for '{}'", credentials.username);
    Ok(StatusCode::OK)
}

/// Log out and clear the session cookie
#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Logged out, session cookie cleared"),
        (status = 401, description = "No session cookie", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Result<StatusCode, ApiError> {
    trace!("Entering logout function");
    let token = session_token(&cookies, &state.session_cookie);

    state.auth.logout(token.as_deref()).await?;

    cookies.remove(session_cookie(&state.session_cookie, String::new()));
    Ok(StatusCode::NO_CONTENT)
}

/// Get the user owning the current session
#[utoipa::path(
    get,
    path = "/profile",
    tag = "auth",
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<UserResponse>),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 404, description = "Session user no longer exists", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn profile(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    trace!("Entering profile function");
    let token = session_token(&cookies, &state.session_cookie);

    let user = state.auth.profile(token.as_deref()).await?;

    Ok(Json(ApiResponse::new(
        UserResponse::from(user),
        "Profile retrieved successfully",
    )))
}
