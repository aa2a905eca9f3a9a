//! Account payable routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smartbudget_db::{
    AccountPayableDetail, AccountPayableRepository, CreateEntryInput, UpdateEntryInput,
    entities::{accounts_payable, sheets},
};
use validator::Validate;

use super::{JsonBody, not_blank, parse_id, render_time};
use crate::{AppState, error::{ApiError, ApiResult}, middleware::AuthUser};

/// Creates the account payable routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts-payable",
            get(list_payables).post(create_payable),
        )
        .route(
            "/accounts-payable/{id}",
            get(get_payable)
                .post(duplicate_payable)
                .patch(update_payable)
                .delete(remove_payable),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a line item.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    /// Description, unique within the sheet.
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    /// Amount.
    pub value: Decimal,
    /// Sheet the line belongs to.
    pub sheet_id: i32,
}

impl From<CreateEntryRequest> for CreateEntryInput {
    fn from(req: CreateEntryRequest) -> Self {
        Self {
            description: req.description,
            value: req.value,
            sheet_id: req.sheet_id,
        }
    }
}

/// Request body for updating a line item.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    /// New description.
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    /// New amount.
    pub value: Option<Decimal>,
    /// Sheet to move the line to.
    pub sheet_id: Option<i32>,
}

impl From<UpdateEntryRequest> for UpdateEntryInput {
    fn from(req: UpdateEntryRequest) -> Self {
        Self {
            description: req.description,
            value: req.value,
            sheet_id: req.sheet_id,
        }
    }
}

/// Query string for line item listings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesQuery {
    /// Restricts the listing to one sheet.
    pub sheet_id: Option<String>,
}

impl ListEntriesQuery {
    /// The sheet filter, if one was given.
    pub(crate) fn sheet_filter(&self) -> Result<Option<i32>, ApiError> {
        self.sheet_id
            .as_deref()
            .map(|raw| {
                raw.trim()
                    .parse::<i32>()
                    .map_err(|_| ApiError::bad_request("invalid sheetId"))
            })
            .transpose()
    }
}

/// Response for an account payable.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayableResponse {
    /// Account payable ID.
    pub id: i32,
    /// Description.
    pub description: String,
    /// Amount.
    pub value: Decimal,
    /// Owner ID.
    pub creator_user_id: i32,
    /// Sheet ID.
    pub sheet_id: i32,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl AccountPayableResponse {
    pub(crate) fn render(payable: accounts_payable::Model, state: &AppState) -> Self {
        Self {
            id: payable.id,
            description: payable.description,
            value: payable.value,
            creator_user_id: payable.creator_user_id,
            sheet_id: payable.sheet_id,
            created_at: render_time(payable.created_at, state.timezone),
            updated_at: render_time(payable.updated_at, state.timezone),
        }
    }
}

/// Summary of the sheet a line item belongs to.
#[derive(Debug, Serialize)]
pub struct SheetSummary {
    /// Sheet ID.
    pub id: i32,
    /// Sheet description.
    pub description: String,
}

impl From<sheets::Model> for SheetSummary {
    fn from(sheet: sheets::Model) -> Self {
        Self {
            id: sheet.id,
            description: sheet.description,
        }
    }
}

/// An account payable with its sheet.
#[derive(Debug, Serialize)]
pub struct AccountPayableDetailResponse {
    /// The line item.
    #[serde(flatten)]
    pub payable: AccountPayableResponse,
    /// Its sheet.
    pub sheet: SheetSummary,
}

impl AccountPayableDetailResponse {
    fn render(detail: AccountPayableDetail, state: &AppState) -> Self {
        Self {
            payable: AccountPayableResponse::render(detail.payable, state),
            sheet: detail.sheet.into(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /accounts-payable
async fn create_payable(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<CreateEntryRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;
    let payable = AccountPayableRepository::new((*state.db).clone())
        .create(auth.user_id(), payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountPayableResponse::render(payable, &state)),
    ))
}

/// GET /accounts-payable?sheetId=
async fn list_payables(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListEntriesQuery>,
) -> ApiResult<impl IntoResponse> {
    let sheet_id = query.sheet_filter()?;
    let payables = AccountPayableRepository::new((*state.db).clone())
        .find_all(auth.user_id(), sheet_id)
        .await?;

    let response: Vec<AccountPayableResponse> = payables
        .into_iter()
        .map(|p| AccountPayableResponse::render(p, &state))
        .collect();
    Ok(Json(response))
}

/// GET /accounts-payable/{id}
async fn get_payable(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let detail = AccountPayableRepository::new((*state.db).clone())
        .find_one(auth.user_id(), id)
        .await?;

    Ok(Json(AccountPayableDetailResponse::render(detail, &state)))
}

/// POST /accounts-payable/{id} - copy a payable within its sheet.
async fn duplicate_payable(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let copy = AccountPayableRepository::new((*state.db).clone())
        .duplicate(auth.user_id(), id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountPayableResponse::render(copy, &state)),
    ))
}

/// PATCH /accounts-payable/{id}
async fn update_payable(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateEntryRequest>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    payload.validate()?;
    let payable = AccountPayableRepository::new((*state.db).clone())
        .update(auth.user_id(), id, payload.into())
        .await?;

    Ok(Json(AccountPayableResponse::render(payable, &state)))
}

/// DELETE /accounts-payable/{id}
async fn remove_payable(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let payable = AccountPayableRepository::new((*state.db).clone())
        .remove(auth.user_id(), id)
        .await?;

    Ok(Json(AccountPayableResponse::render(payable, &state)))
}
