//! Accounts payable repository.
//!
//! A payable belongs to one sheet and carries the sheet owner's id.
//! Descriptions are unique within a sheet.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use smartbudget_core::access::{AccessError, Action, ResourceKind};
use smartbudget_core::sheet::{generate_duplicate_description, normalize_description};
use smartbudget_shared::AppError;

use super::entry::{authorized_entry, check_description, descriptions_in};
use super::{CreateEntryInput, UpdateEntryInput, owned_sheet, resolve_actor};
use crate::entities::{accounts_payable, sheets};
use crate::error::StoreResult;

/// A payable with the sheet it belongs to.
#[derive(Debug, Clone)]
pub struct AccountPayableDetail {
    /// Payable record.
    pub payable: accounts_payable::Model,
    /// Parent sheet.
    pub sheet: sheets::Model,
}

/// Accounts payable repository.
#[derive(Debug, Clone)]
pub struct AccountPayableRepository {
    db: DatabaseConnection,
}

impl AccountPayableRepository {
    /// Creates a new accounts payable repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a payable to one of the actor's sheets.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The actor no longer exists
    /// - The sheet is missing or owned by someone else
    /// - The sheet already has a payable with this description
    /// - Database operation fails
    pub async fn create(
        &self,
        actor_id: i32,
        input: CreateEntryInput,
    ) -> StoreResult<accounts_payable::Model> {
        resolve_actor(&self.db, actor_id).await?;
        let sheet = owned_sheet(&self.db, actor_id, Action::Modify, input.sheet_id).await?;

        let description = normalize_description(&input.description);
        check_description::<accounts_payable::Entity, _>(&self.db, sheet.id, &description, None)
            .await?;

        let now = Utc::now().into();
        let payable = accounts_payable::ActiveModel {
            description: Set(description),
            value: Set(input.value),
            creator_user_id: Set(actor_id),
            sheet_id: Set(sheet.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::debug!(user_id = actor_id, sheet_id = sheet.id, "account payable created");
        Ok(payable)
    }

    /// Lists the actor's payables, newest first, optionally for one sheet.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor no longer exists, the filter sheet is not
    /// the actor's, or the query fails.
    pub async fn find_all(
        &self,
        actor_id: i32,
        sheet_id: Option<i32>,
    ) -> StoreResult<Vec<accounts_payable::Model>> {
        resolve_actor(&self.db, actor_id).await?;

        let mut query = accounts_payable::Entity::find()
            .filter(accounts_payable::Column::CreatorUserId.eq(actor_id));
        if let Some(sheet_id) = sheet_id {
            owned_sheet(&self.db, actor_id, Action::Access, sheet_id).await?;
            query = query.filter(accounts_payable::Column::SheetId.eq(sheet_id));
        }

        Ok(query
            .order_by_desc(accounts_payable::Column::CreatedAt)
            .order_by_desc(accounts_payable::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Gets one of the actor's payables with its sheet.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Unauthorized` per ownership, or an error if the
    /// query fails.
    pub async fn find_one(&self, actor_id: i32, id: i32) -> StoreResult<AccountPayableDetail> {
        resolve_actor(&self.db, actor_id).await?;
        let payable = self.authorized(actor_id, Action::Access, id).await?;

        let sheet = payable
            .find_related(sheets::Entity)
            .one(&self.db)
            .await?
            .ok_or(AccessError::NotFound {
                kind: ResourceKind::Sheet,
                id: payable.sheet_id,
            })?;

        Ok(AccountPayableDetail { payable, sheet })
    }

    /// Updates one of the actor's payables.
    ///
    /// Moving to another sheet requires owning that sheet. The description is
    /// checked against the target sheet whenever it or the sheet changes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The payable or the target sheet is missing or owned by someone else
    /// - The target sheet already has a payable with the description
    /// - Database operation fails
    pub async fn update(
        &self,
        actor_id: i32,
        id: i32,
        input: UpdateEntryInput,
    ) -> StoreResult<accounts_payable::Model> {
        resolve_actor(&self.db, actor_id).await?;
        let payable = self.authorized(actor_id, Action::Modify, id).await?;

        let target_sheet_id = match input.sheet_id {
            Some(sheet_id) if sheet_id != payable.sheet_id => {
                owned_sheet(&self.db, actor_id, Action::Modify, sheet_id).await?.id
            }
            _ => payable.sheet_id,
        };
        let description = input.description.as_deref().map(normalize_description);

        if description.is_some() || target_sheet_id != payable.sheet_id {
            let candidate = description.as_deref().unwrap_or(&payable.description);
            check_description::<accounts_payable::Entity, _>(
                &self.db,
                target_sheet_id,
                candidate,
                Some(id),
            )
            .await?;
        }

        let mut active: accounts_payable::ActiveModel = payable.into();
        if let Some(description) = description {
            active.description = Set(description);
        }
        if let Some(value) = input.value {
            active.value = Set(value);
        }
        active.sheet_id = Set(target_sheet_id);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes one of the actor's payables.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Unauthorized` per ownership, or an error if the
    /// delete fails.
    pub async fn remove(&self, actor_id: i32, id: i32) -> StoreResult<accounts_payable::Model> {
        resolve_actor(&self.db, actor_id).await?;
        let payable = self.authorized(actor_id, Action::Delete, id).await?;

        payable.clone().delete(&self.db).await?;
        Ok(payable)
    }

    /// Copies one of the actor's payables into the same sheet.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Unauthorized` per ownership, or
    /// `AppError::Internal` if the insert fails.
    pub async fn duplicate(&self, actor_id: i32, id: i32) -> StoreResult<accounts_payable::Model> {
        resolve_actor(&self.db, actor_id).await?;
        let source = self.authorized(actor_id, Action::Duplicate, id).await?;

        let existing =
            descriptions_in::<accounts_payable::Entity, _>(&self.db, source.sheet_id, None).await?;
        let description = generate_duplicate_description(&source.description, &existing);

        let now = Utc::now().into();
        let inserted = accounts_payable::ActiveModel {
            description: Set(description),
            value: Set(source.value),
            creator_user_id: Set(actor_id),
            sheet_id: Set(source.sheet_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        inserted.map_err(|e| {
            tracing::error!(user_id = actor_id, sheet_id = source.sheet_id, error = %e, "account payable duplication failed");
            AppError::Internal("error duplicating account payable".to_string()).into()
        })
    }

    async fn authorized(
        &self,
        actor_id: i32,
        action: Action,
        id: i32,
    ) -> StoreResult<accounts_payable::Model> {
        authorized_entry::<accounts_payable::Entity, _>(&self.db, actor_id, action, id).await
    }
}
