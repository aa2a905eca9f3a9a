//! Sheet routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smartbudget_db::{
    CreateSheetInput, SheetDetail, SheetRepository, UpdateSheetInput, entities::sheets,
};
use validator::Validate;

use super::{
    JsonBody,
    accounts_payable::AccountPayableResponse,
    accounts_receivable::AccountReceivableResponse,
    not_blank, parse_id, render_time,
};
use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the sheet routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sheets", get(list_sheets).post(create_sheet))
        .route(
            "/sheets/{id}",
            get(get_sheet)
                .post(duplicate_sheet)
                .patch(update_sheet)
                .delete(remove_sheet),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a sheet.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSheetRequest {
    /// Sheet description, unique among the user's sheets.
    #[validate(custom(function = "not_blank"))]
    pub description: String,
}

/// Request body for updating a sheet.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSheetRequest {
    /// New description.
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
}

/// Response for a sheet.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetResponse {
    /// Sheet ID.
    pub id: i32,
    /// Sheet description.
    pub description: String,
    /// Owner ID.
    pub creator_user_id: i32,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl SheetResponse {
    pub(crate) fn render(sheet: sheets::Model, state: &AppState) -> Self {
        Self {
            id: sheet.id,
            description: sheet.description,
            creator_user_id: sheet.creator_user_id,
            created_at: render_time(sheet.created_at, state.timezone),
            updated_at: render_time(sheet.updated_at, state.timezone),
        }
    }
}

/// A sheet with its line items and balance.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetDetailResponse {
    /// The sheet itself.
    #[serde(flatten)]
    pub sheet: SheetResponse,
    /// Expense lines.
    pub accounts_payable: Vec<AccountPayableResponse>,
    /// Income lines.
    pub accounts_receivable: Vec<AccountReceivableResponse>,
    /// Sum of payable values.
    pub total_payable: Decimal,
    /// Sum of receivable values.
    pub total_receivable: Decimal,
    /// Receivables minus payables, in cents.
    pub balance: Decimal,
}

impl SheetDetailResponse {
    fn render(detail: SheetDetail, state: &AppState) -> Self {
        Self {
            sheet: SheetResponse::render(detail.sheet, state),
            accounts_payable: detail
                .payables
                .into_iter()
                .map(|p| AccountPayableResponse::render(p, state))
                .collect(),
            accounts_receivable: detail
                .receivables
                .into_iter()
                .map(|r| AccountReceivableResponse::render(r, state))
                .collect(),
            total_payable: detail.totals.total_payable,
            total_receivable: detail.totals.total_receivable,
            balance: detail.totals.balance,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /sheets
async fn create_sheet(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<CreateSheetRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;
    let sheet = SheetRepository::new((*state.db).clone())
        .create(
            auth.user_id(),
            CreateSheetInput {
                description: payload.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(SheetResponse::render(sheet, &state))))
}

/// GET /sheets
async fn list_sheets(State(state): State<AppState>, auth: AuthUser) -> ApiResult<impl IntoResponse> {
    let sheets = SheetRepository::new((*state.db).clone())
        .find_all(auth.user_id())
        .await?;

    let response: Vec<SheetResponse> = sheets
        .into_iter()
        .map(|s| SheetResponse::render(s, &state))
        .collect();
    Ok(Json(response))
}

/// GET /sheets/{id}
async fn get_sheet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let detail = SheetRepository::new((*state.db).clone())
        .find_one(auth.user_id(), id)
        .await?;

    Ok(Json(SheetDetailResponse::render(detail, &state)))
}

/// POST /sheets/{id} - copy a sheet with all of its line items.
async fn duplicate_sheet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let copy = SheetRepository::new((*state.db).clone())
        .duplicate(auth.user_id(), id)
        .await?;

    Ok((StatusCode::CREATED, Json(SheetResponse::render(copy, &state))))
}

/// PATCH /sheets/{id}
async fn update_sheet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateSheetRequest>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    payload.validate()?;
    let sheet = SheetRepository::new((*state.db).clone())
        .update(
            auth.user_id(),
            id,
            UpdateSheetInput {
                description: payload.description,
            },
        )
        .await?;

    Ok(Json(SheetResponse::render(sheet, &state)))
}

/// DELETE /sheets/{id}
async fn remove_sheet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let sheet = SheetRepository::new((*state.db).clone())
        .remove(auth.user_id(), id)
        .await?;

    Ok(Json(SheetResponse::render(sheet, &state)))
}
