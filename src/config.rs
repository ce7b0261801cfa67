use std::path::Path;

use anyhow::Result;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use model::{AuthService, UserStore};
use serde::Deserialize;

use crate::schemas::AppState;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_SESSION_COOKIE: &str = "session";

/// Runtime settings, layered from defaults, an optional config file and
/// `HTTPDEMO__*` environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    /// Address the HTTP server binds to (IP:PORT)
    pub bind_address: String,
    /// Upper bound on the time spent serving one request
    pub request_timeout_secs: u64,
    pub session_cookie: SessionCookieSettings,
}

/// Attributes of the cookie carrying the session token
#[derive(Clone, Debug, Deserialize)]
pub struct SessionCookieSettings {
    pub name: String,
    /// Only send the cookie over HTTPS
    pub secure: bool,
}

impl Settings {
    /// Load settings. Without an explicit `path`, `httpdemo.{toml,yaml,json}`
    /// in the working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // Load .env before reading the environment
        dotenvy::dotenv().ok();

        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("httpdemo").required(false),
        };

        let settings = Self::defaults()?
            .add_source(file)
            .add_source(
                Environment::with_prefix("HTTPDEMO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("request_timeout_secs", 30i64)?
            .set_default("session_cookie.name", DEFAULT_SESSION_COOKIE)?
            .set_default("session_cookie.secure", false)?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            request_timeout_secs: 30,
            session_cookie: SessionCookieSettings {
                name: DEFAULT_SESSION_COOKIE.to_string(),
                secure: false,
            },
        }
    }
}

/// Initialize application state: an empty user store and the session
/// component reading from it.
pub fn initialize_app_state(settings: &Settings) -> AppState {
    tracing::info!("Initializing in-memory user store");
    let users = UserStore::new();
    let auth = AuthService::new(users.clone());

    AppState {
        users,
        auth,
        session_cookie: settings.session_cookie.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults_deserialize() {
        let settings: Settings = Settings::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.session_cookie.name, DEFAULT_SESSION_COOKIE);
        assert!(!settings.session_cookie.secure);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let toml = r#"
            bind_address = "127.0.0.1:9000"

            [session_cookie]
            name = "sid"
            secure = true
        "#;

        let settings: Settings = Settings::defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.bind_address, "127.0.0.1:9000");
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.session_cookie.name, "sid");
        assert!(settings.session_cookie.secure);
    }
}
