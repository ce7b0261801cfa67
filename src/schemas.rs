use model::{AuthService, UserStore};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::config::SessionCookieSettings;
use crate::handlers::auth::LoginRequest;
use crate::handlers::users::{CreateUserRequest, UpdateUserRequest, UserResponse};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Authoritative user collection
    pub users: UserStore,
    /// Session-based authentication over `users`
    pub auth: AuthService,
    /// Cookie carrying the session token
    pub session_cookie: SessionCookieSettings,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of stored users
    pub users: usize,
    /// Number of active sessions
    pub sessions: u64,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::auth::login,
        crate::handlers::auth::logout,
        crate::handlers::auth::profile,
        crate::handlers::demo::hello_get,
        crate::handlers::demo::hello_post,
        crate::handlers::demo::hello_patch,
        crate::handlers::demo::hello_delete,
        crate::handlers::demo::path_parameter_demo,
        crate::handlers::demo::query_parameters_demo,
        crate::handlers::demo::body_demo,
        crate::handlers::demo::content_negotiation_demo,
        crate::handlers::demo::cookie_demo,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            LoginRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "In-memory user CRUD"),
        (name = "auth", description = "Session cookie login, logout and profile"),
        (name = "demo", description = "HTTP mechanics demonstrations"),
    ),
    info(
        title = "httpdemo API",
        description = "HTTP mechanics demo with in-memory users and session authentication",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
