//! Rendering of application errors as JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use smartbudget_core::{access::AccessError, auth::PasswordError};
use smartbudget_db::StoreError;
use smartbudget_shared::{AppError, JwtError};

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An `AppError` on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Body of every error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    error: &'static str,
    message: &'a str,
    status_code: u16,
}

impl ApiError {
    /// Shorthand for a 400 with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(AppError::BadRequest(message.into()))
    }

    /// The wrapped error.
    pub const fn inner(&self) -> &AppError {
        &self.0
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.0;
        let status =
            StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if error.is_server_error() {
            tracing::error!(error = %error, "request failed");
        }
        // driver details stay in the logs
        let message = match &error {
            AppError::Database(_) => "Internal Server Error",
            other => other.message(),
        };

        let body = ErrorBody {
            error: error.error_code(),
            message,
            status_code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        Self(error.into())
    }
}

impl From<AccessError> for ApiError {
    fn from(error: AccessError) -> Self {
        Self(error.into())
    }
}

impl From<JwtError> for ApiError {
    fn from(error: JwtError) -> Self {
        Self(error.into())
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        Self(error.into())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self(errors.into())
    }
}
