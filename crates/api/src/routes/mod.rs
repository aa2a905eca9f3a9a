//! API route definitions.

use axum::{
    Json, Router,
    extract::{FromRequest, Request, rejection::JsonRejection},
    middleware,
};
use chrono::Utc;
use chrono_tz::Tz;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::de::DeserializeOwned;
use smartbudget_shared::format_in_timezone;
use validator::ValidationError;

use crate::{AppState, error::ApiError, middleware::auth_middleware};

pub mod accounts_payable;
pub mod accounts_receivable;
pub mod health;
pub mod sheets;
pub mod users;

/// Creates the API router with public and protected routes.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(users::protected_routes())
        .merge(sheets::routes())
        .merge(accounts_payable::routes())
        .merge(accounts_receivable::routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(users::public_routes())
        .merge(protected_routes)
}

/// Parses a path id. Anything but an integer is a bad request.
pub(crate) fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::bad_request("invalid id"))
}

/// Renders a stored instant in the configured zone.
pub(crate) fn render_time(instant: DateTimeWithTimeZone, tz: Tz) -> String {
    format_in_timezone(instant.with_timezone(&Utc), tz)
}

/// Field validator for descriptions: blank after trimming is rejected.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("description must not be empty".into()));
    }
    Ok(())
}

/// JSON body extractor whose rejections use the API error shape.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection_message(&rejection))),
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "expected request with `Content-Type: application/json`".to_string()
        }
        other => other.body_text(),
    }
}
