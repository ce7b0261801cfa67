use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use axum_valid::ValidRejection;
use model::ModelError;
use thiserror::Error;

use crate::schemas::ErrorResponse;

/// Errors surfaced to HTTP clients. Each one ends the request.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Missing or malformed input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// None of the representations listed in `Accept` can be produced
    #[error("Not acceptable")]
    NotAcceptable,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Model(ModelError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Model(ModelError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Model(ModelError::Unauthorized) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Model(ModelError::NotFound(_)) => "USER_NOT_FOUND",
            ApiError::Model(ModelError::Conflict(_)) => "USERNAME_ALREADY_EXISTS",
            ApiError::Model(ModelError::Unauthorized) => "UNAUTHORIZED",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::NotAcceptable => "NOT_ACCEPTABLE",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<ValidRejection<ApiError>> for ApiError {
    fn from(rejection: ValidRejection<ApiError>) -> Self {
        match rejection {
            ValidRejection::Valid(errors) => ApiError::BadRequest(errors.to_string()),
            ValidRejection::Inner(error) => error,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
            success: false,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_errors_map_to_status_codes() {
        assert_eq!(ApiError::from(ModelError::NotFound(1)).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(ModelError::Conflict("alice".into())).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::from(ModelError::Unauthorized).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotAcceptable.status_code(), StatusCode::NOT_ACCEPTABLE);
    }

    #[test]
    fn test_error_message_comes_from_model() {
        let error = ApiError::from(ModelError::Conflict("alice".into()));
        assert_eq!(error.to_string(), "Username 'alice' already exists");
        assert_eq!(error.code(), "USERNAME_ALREADY_EXISTS");
    }

    #[test]
    fn test_validation_errors_become_bad_request() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("username", validator::ValidationError::new("length"));

        let error = ApiError::from(ValidRejection::<ApiError>::Valid(errors));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), "BAD_REQUEST");
        assert!(error.to_string().contains("username"));
    }

    #[test]
    fn test_inner_rejection_is_kept() {
        let error = ApiError::from(ValidRejection::Inner(ApiError::NotAcceptable));
        assert_eq!(error.status_code(), StatusCode::NOT_ACCEPTABLE);
    }
}
