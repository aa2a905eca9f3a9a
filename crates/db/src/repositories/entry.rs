//! Lookups shared by the payable and receivable repositories.
//!
//! Both kinds of line item live in a sheet, carry the owner's id and keep
//! their descriptions unique within the sheet.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use smartbudget_core::access::{Action, Owned, authorize};
use smartbudget_core::sheet::ensure_unique_description;

use crate::entities::{accounts_payable, accounts_receivable};
use crate::error::StoreResult;

/// A line item table.
pub(crate) trait EntryEntity: EntityTrait {
    /// Primary key column.
    fn id_column() -> Self::Column;

    /// Parent sheet column.
    fn sheet_column() -> Self::Column;

    /// Stored description of a row.
    fn description(model: &Self::Model) -> &str;
}

impl EntryEntity for accounts_payable::Entity {
    fn id_column() -> Self::Column {
        accounts_payable::Column::Id
    }

    fn sheet_column() -> Self::Column {
        accounts_payable::Column::SheetId
    }

    fn description(model: &Self::Model) -> &str {
        &model.description
    }
}

impl EntryEntity for accounts_receivable::Entity {
    fn id_column() -> Self::Column {
        accounts_receivable::Column::Id
    }

    fn sheet_column() -> Self::Column {
        accounts_receivable::Column::SheetId
    }

    fn description(model: &Self::Model) -> &str {
        &model.description
    }
}

/// Loads a line item and checks that `actor_id` owns it.
pub(crate) async fn authorized_entry<E, C>(
    db: &C,
    actor_id: i32,
    action: Action,
    id: i32,
) -> StoreResult<E::Model>
where
    E: EntryEntity,
    E::Model: Owned,
    C: ConnectionTrait,
{
    let entry = E::find().filter(E::id_column().eq(id)).one(db).await?;
    Ok(authorize(actor_id, action, id, entry)?)
}

/// Descriptions of the line items in a sheet, optionally leaving one out.
pub(crate) async fn descriptions_in<E, C>(
    db: &C,
    sheet_id: i32,
    except: Option<i32>,
) -> StoreResult<Vec<String>>
where
    E: EntryEntity,
    E::Model: Owned,
    C: ConnectionTrait,
{
    let mut query = E::find().filter(E::sheet_column().eq(sheet_id));
    if let Some(id) = except {
        query = query.filter(E::id_column().ne(id));
    }

    Ok(query
        .all(db)
        .await?
        .iter()
        .map(|entry| E::description(entry).to_string())
        .collect())
}

/// Fails with `Conflict` if the sheet already has a line item of this kind
/// with `description`.
pub(crate) async fn check_description<E, C>(
    db: &C,
    sheet_id: i32,
    description: &str,
    except: Option<i32>,
) -> StoreResult<()>
where
    E: EntryEntity,
    E::Model: Owned,
    C: ConnectionTrait,
{
    let existing = descriptions_in::<E, C>(db, sheet_id, except).await?;
    ensure_unique_description(
        <E::Model as Owned>::KIND,
        description,
        existing.iter().map(String::as_str),
    )?;
    Ok(())
}
