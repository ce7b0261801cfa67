use thiserror::Error;

/// Error types for the user store and the session/auth component
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// No user is stored under the given id
    #[error("User with id {0} not found")]
    NotFound(i32),

    /// Another user already holds the given username
    #[error("Username '{0}' already exists")]
    Conflict(String),

    /// Missing or unknown session, or credentials that match no user
    #[error("Unauthorized")]
    Unauthorized,
}

/// Type alias for Result with ModelError
pub type Result<T> = std::result::Result<T, ModelError>;
