//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every sheet and line item operation takes the acting user's id and
//! enforces ownership before touching a record.

pub mod account_payable;
pub mod account_receivable;
mod entry;
pub mod sheet;
pub mod user;

pub use account_payable::{AccountPayableDetail, AccountPayableRepository};
pub use account_receivable::{AccountReceivableDetail, AccountReceivableRepository};
pub use sheet::{CreateSheetInput, SheetDetail, SheetRepository, UpdateSheetInput};
pub use user::{CreateUserInput, UpdateUserInput, UserRepository};

use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, EntityTrait};
use smartbudget_core::access::{Action, authorize, require_actor};

use crate::entities::{sheets, users};
use crate::error::StoreResult;

/// Input for creating a payable or receivable.
#[derive(Debug, Clone)]
pub struct CreateEntryInput {
    /// Description, unique within the sheet.
    pub description: String,
    /// Amount.
    pub value: Decimal,
    /// Owning sheet.
    pub sheet_id: i32,
}

/// Input for updating a payable or receivable.
#[derive(Debug, Clone, Default)]
pub struct UpdateEntryInput {
    /// New description.
    pub description: Option<String>,
    /// New amount.
    pub value: Option<Decimal>,
    /// Move to another sheet of the same owner.
    pub sheet_id: Option<i32>,
}

/// Loads the acting user, failing if the token subject is gone.
pub(crate) async fn resolve_actor<C: ConnectionTrait>(
    db: &C,
    actor_id: i32,
) -> StoreResult<users::Model> {
    let user = users::Entity::find_by_id(actor_id).one(db).await?;
    Ok(require_actor(user)?)
}

/// Loads a sheet and checks that `actor_id` owns it.
pub(crate) async fn owned_sheet<C: ConnectionTrait>(
    db: &C,
    actor_id: i32,
    action: Action,
    sheet_id: i32,
) -> StoreResult<sheets::Model> {
    let sheet = sheets::Entity::find_by_id(sheet_id).one(db).await?;
    Ok(authorize(actor_id, action, sheet_id, sheet)?)
}
