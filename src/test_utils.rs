#[cfg(test)]
pub mod test_utils {
    use crate::config::{initialize_app_state, Settings};
    use crate::handlers::users::CreateUserRequest;
    use crate::router::create_router;
    use crate::schemas::{ApiResponse, AppState};
    use axum::http::StatusCode;
    use axum::Router;
    use axum_test::TestServer;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Create AppState for testing, with an empty user store
    pub fn setup_test_app_state() -> AppState {
        initialize_app_state(&Settings::default())
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set. Only the first call installs the
    /// subscriber.
    fn init_test_tracing() {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let _ = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Create axum app for testing
    pub fn setup_test_app() -> Router {
        init_test_tracing();

        create_router(setup_test_app_state(), &Settings::default())
    }

    /// Create axum app and wrap it in a test server
    pub fn setup_test_server() -> TestServer {
        TestServer::new(setup_test_app()).unwrap()
    }

    pub fn create_user_request(username: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            password: password.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        }
    }

    /// Create a user through the API and return its id
    pub async fn create_test_user(server: &TestServer, username: &str, password: &str) -> i64 {
        let response = server
            .post("/users")
            .json(&create_user_request(username, password))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }
}
