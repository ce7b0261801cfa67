//! Extractors whose rejections render as [`ApiError`] JSON instead of axum's
//! plain-text bodies.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
};
use axum_valid::{HasValidate, Valid};
use serde::de::DeserializeOwned;
use validator::Validate;

/// `axum::Json` with a 400 [`ApiError`] rejection
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl<T> HasValidate for ApiJson<T> {
    type Validate = T;

    fn get_validate(&self) -> &T {
        &self.0
    }
}

/// `axum::extract::Path` with a 400 [`ApiError`] rejection
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// A JSON body that also passes its `validator` rules
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Valid(ApiJson(value)) = Valid::<ApiJson<T>>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
