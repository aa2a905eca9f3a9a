//! Account receivable routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Serialize;
use smartbudget_db::{
    AccountReceivableDetail, AccountReceivableRepository, entities::accounts_receivable,
};
use validator::Validate;

use super::{
    JsonBody,
    accounts_payable::{CreateEntryRequest, ListEntriesQuery, SheetSummary, UpdateEntryRequest},
    parse_id, render_time,
};
use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the account receivable routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts-receivable",
            get(list_receivables).post(create_receivable),
        )
        .route(
            "/accounts-receivable/{id}",
            get(get_receivable)
                .post(duplicate_receivable)
                .patch(update_receivable)
                .delete(remove_receivable),
        )
}

/// Response for an account receivable.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountReceivableResponse {
    /// Account receivable ID.
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

impl AccountReceivableResponse {
    pub(crate) fn render(receivable: accounts_receivable::Model, state: &AppState) -> Self {
        Self {
            id: receivable.id,
            description: receivable.description,
            value: receivable.value,
            creator_user_id: receivable.creator_user_id,
            sheet_id: receivable.sheet_id,
            created_at: render_time(receivable.created_at, state.timezone),
            updated_at: render_time(receivable.updated_at, state.timezone),
        }
    }
}

/// An account receivable with its sheet.
#[derive(Debug, Serialize)]
pub struct AccountReceivableDetailResponse {
    /// The line item.
    #[serde(flatten)]
    pub receivable: AccountReceivableResponse,
    /// Its sheet.
    pub sheet: SheetSummary,
}

/// POST /accounts-receivable
async fn create_receivable(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<CreateEntryRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;
    let receivable = AccountReceivableRepository::new((*state.db).clone())
        .create(auth.user_id(), payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountReceivableResponse::render(receivable, &state)),
    ))
}

/// GET /accounts-receivable?sheetId=
async fn list_receivables(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListEntriesQuery>,
) -> ApiResult<impl IntoResponse> {
    let sheet_id = query.sheet_filter()?;
    let receivables = AccountReceivableRepository::new((*state.db).clone())
        .find_all(auth.user_id(), sheet_id)
        .await?;

    let response: Vec<AccountReceivableResponse> = receivables
        .into_iter()
        .map(|r| AccountReceivableResponse::render(r, &state))
        .collect();
    Ok(Json(response))
}

/// GET /accounts-receivable/{id}
async fn get_receivable(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let AccountReceivableDetail { receivable, sheet } =
        AccountReceivableRepository::new((*state.db).clone())
            .find_one(auth.user_id(), id)
            .await?;

    Ok(Json(AccountReceivableDetailResponse {
        receivable: AccountReceivableResponse::render(receivable, &state),
        sheet: sheet.into(),
    }))
}

/// POST /accounts-receivable/{id}
async fn duplicate_receivable(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let copy = AccountReceivableRepository::new((*state.db).clone())
        .duplicate(auth.user_id(), id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountReceivableResponse::render(copy, &state)),
    ))
}

/// PATCH /accounts-receivable/{id}
async fn update_receivable(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateEntryRequest>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    payload.validate()?;
    let receivable = AccountReceivableRepository::new((*state.db).clone())
        .update(auth.user_id(), id, payload.into())
        .await?;

    Ok(Json(AccountReceivableResponse::render(receivable, &state)))
}

/// DELETE /accounts-receivable/{id}
async fn remove_receivable(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let receivable = AccountReceivableRepository::new((*state.db).clone())
        .remove(auth.user_id(), id)
        .await?;

    Ok(Json(AccountReceivableResponse::render(receivable, &state)))
}
