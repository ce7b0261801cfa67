use crate::config::Settings;
use crate::handlers::{
    auth::{login, logout, profile},
    demo::{
        body_demo, content_negotiation_demo, cookie_demo, hello_delete, hello_get, hello_patch,
        hello_post, path_parameter_demo, query_parameters_demo,
    },
    health::health_check,
    users::{create_user, delete_user, get_user, get_users, update_user},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_cookies::CookieManagerLayer;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Demo routes
        .route(
            "/",
            get(hello_get)
                .post(hello_post)
                .patch(hello_patch)
                .delete(hello_delete),
        )
        .route("/path-parameter-demo/:path_parameter", get(path_parameter_demo))
        .route("/query-parameters-demo", get(query_parameters_demo))
        .route("/body-demo", post(body_demo))
        .route("/content-negotiation-demo", get(content_negotiation_demo))
        .route("/cookie-demo", get(cookie_demo))
        // Auth routes
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/profile", get(profile))
        // User CRUD routes
        .route("/users", post(create_user).get(get_users))
        .route(
            "/users/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    settings.request_timeout_secs,
                )))
                .layer(CorsLayer::permissive())
                .layer(CookieManagerLayer::new()),
        )
        .with_state(state)
}
