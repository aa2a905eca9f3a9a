//! User account routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::Serialize;
use smartbudget_db::entities::users;
use smartbudget_shared::auth::{
    RecoverPasswordRequest, ResendValidationEmailRequest, SigninRequest, SignupRequest,
    UpdatePasswordRequest, UpdateUserRequest, ValidateDataRequest,
};
use validator::Validate;

use super::{JsonBody, parse_id, render_time};
use crate::{AppState, error::ApiResult, middleware::AuthUser, services::AccountService};

/// Routes reachable without a token.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users/signup", post(signup))
        .route("/users/signin", post(signin))
        .route("/users/recover", post(recover_password))
        .route("/users/resend-validation-email", post(resend_validation_email))
}

/// Routes that need the auth middleware.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/users/signup/confirm-email", post(confirm_email))
        .route("/users/validate-data", post(validate_data))
        .route("/users", patch(update_password))
        .route(
            "/users/{id}",
            get(find_user).patch(update_user).delete(remove_user),
        )
}

/// A user as returned by the API. The password hash never leaves the server.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: i32,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Whether the email was confirmed.
    pub email_validated: bool,
    /// When the email was confirmed.
    pub email_validated_at: Option<String>,
    /// When the last recovery email was sent.
    pub recover_sent_at: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl UserResponse {
    fn render(user: users::Model, state: &AppState) -> Self {
        let tz = state.timezone;
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            email_validated: user.email_validated,
            email_validated_at: user.email_validated_at.map(|t| render_time(t, tz)),
            recover_sent_at: user.recover_sent_at.map(|t| render_time(t, tz)),
            created_at: render_time(user.created_at, tz),
            updated_at: render_time(user.updated_at, tz),
        }
    }
}

/// POST /users/signup
async fn signup(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;
    let user = AccountService::from_state(&state).signup(payload).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::render(user, &state))))
}

/// POST /users/signin
async fn signin(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SigninRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;
    let response = AccountService::from_state(&state).signin(payload).await?;
    Ok(Json(response))
}

/// POST /users/signup/confirm-email - the bearer is the emailed token.
async fn confirm_email(State(state): State<AppState>, auth: AuthUser) -> ApiResult<impl IntoResponse> {
    let response = AccountService::from_state(&state)
        .confirm_email(auth.user_id())
        .await?;
    Ok(Json(response))
}

/// POST /users/recover
async fn recover_password(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RecoverPasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    let response = AccountService::from_state(&state)
        .recover_password(payload)
        .await?;
    Ok(Json(response))
}

/// POST /users/resend-validation-email
async fn resend_validation_email(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ResendValidationEmailRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;
    let response = AccountService::from_state(&state)
        .resend_validation_email(&payload.email)
        .await?;
    Ok(Json(response))
}

/// POST /users/validate-data
async fn validate_data(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<ValidateDataRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;
    let response = AccountService::from_state(&state)
        .validate_data(auth.user_id(), payload)
        .await?;
    Ok(Json(response))
}

/// PATCH /users - change the password of the token's user.
async fn update_password(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<UpdatePasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = AccountService::from_state(&state)
        .update_password(auth.user_id(), payload)
        .await?;
    Ok(Json(UserResponse::render(user, &state)))
}

/// GET /users/{id}
async fn find_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let user = AccountService::from_state(&state)
        .find_user(auth.user_id(), id)
        .await?;
    Ok(Json(UserResponse::render(user, &state)))
}

/// PATCH /users/{id}
async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    payload.validate()?;
    let user = AccountService::from_state(&state)
        .update_user(auth.user_id(), id, payload)
        .await?;
    Ok(Json(UserResponse::render(user, &state)))
}

/// DELETE /users/{id}
async fn remove_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let user = AccountService::from_state(&state)
        .remove_user(auth.user_id(), id)
        .await?;
    Ok(Json(UserResponse::render(user, &state)))
}
