//! Accounts receivable repository.
//!
//! A receivable belongs to one sheet and carries the sheet owner's id.
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
use crate::entities::{accounts_receivable, sheets};
use crate::error::StoreResult;

/// A receivable with the sheet it belongs to.
#[derive(Debug, Clone)]
pub struct AccountReceivableDetail {
    /// Receivable record.
    pub receivable: accounts_receivable::Model,
    /// Parent sheet.
    pub sheet: sheets::Model,
}

/// Accounts receivable repository.
#[derive(Debug, Clone)]
pub struct AccountReceivableRepository {
    db: DatabaseConnection,
}

impl AccountReceivableRepository {
    /// Creates a new accounts receivable repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a receivable to one of the actor's sheets.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The actor no longer exists
    /// - The sheet is missing or owned by someone else
    /// - The sheet already has a receivable with this description
    /// - Database operation fails
    pub async fn create(
        &self,
        actor_id: i32,
        input: CreateEntryInput,
    ) -> StoreResult<accounts_receivable::Model> {
        resolve_actor(&self.db, actor_id).await?;
        let sheet = owned_sheet(&self.db, actor_id, Action::Modify, input.sheet_id).await?;

        let description = normalize_description(&input.description);
        check_description::<accounts_receivable::Entity, _>(&self.db, sheet.id, &description, None)
            .await?;

        let now = Utc::now().into();
        let receivable = accounts_receivable::ActiveModel {
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

        tracing::debug!(user_id = actor_id, sheet_id = sheet.id, "account receivable created");
        Ok(receivable)
    }

    /// Lists the actor's receivables, newest first, optionally for one sheet.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor no longer exists, the filter sheet is not
    /// the actor's, or the query fails.
    pub async fn find_all(
        &self,
        actor_id: i32,
        sheet_id: Option<i32>,
    ) -> StoreResult<Vec<accounts_receivable::Model>> {
        resolve_actor(&self.db, actor_id).await?;

        let mut query = accounts_receivable::Entity::find()
            .filter(accounts_receivable::Column::CreatorUserId.eq(actor_id));
        if let Some(sheet_id) = sheet_id {
            owned_sheet(&self.db, actor_id, Action::Access, sheet_id).await?;
            query = query.filter(accounts_receivable::Column::SheetId.eq(sheet_id));
        }

        Ok(query
            .order_by_desc(accounts_receivable::Column::CreatedAt)
            .order_by_desc(accounts_receivable::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Gets one of the actor's receivables with its sheet.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Unauthorized` per ownership, or an error if the
    /// query fails.
    pub async fn find_one(&self, actor_id: i32, id: i32) -> StoreResult<AccountReceivableDetail> {
        resolve_actor(&self.db, actor_id).await?;
        let receivable = self.authorized(actor_id, Action::Access, id).await?;

        let sheet = receivable
            .find_related(sheets::Entity)
            .one(&self.db)
            .await?
            .ok_or(AccessError::NotFound {
                kind: ResourceKind::Sheet,
                id: receivable.sheet_id,
            })?;

        Ok(AccountReceivableDetail { receivable, sheet })
    }

    /// Updates one of the actor's receivables.
    ///
    /// Moving to another sheet requires owning that sheet. The description is
    /// checked against the target sheet whenever it or the sheet changes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The receivable or the target sheet is missing or owned by someone else
    /// - The target sheet already has a receivable with the description
    /// - Database operation fails
    pub async fn update(
        &self,
        actor_id: i32,
        id: i32,
        input: UpdateEntryInput,
    ) -> StoreResult<accounts_receivable::Model> {
        resolve_actor(&self.db, actor_id).await?;
        let receivable = self.authorized(actor_id, Action::Modify, id).await?;

        let target_sheet_id = match input.sheet_id {
            Some(sheet_id) if sheet_id != receivable.sheet_id => {
                owned_sheet(&self.db, actor_id, Action::Modify, sheet_id).await?.id
            }
            _ => receivable.sheet_id,
        };
        let description = input.description.as_deref().map(normalize_description);

        if description.is_some() || target_sheet_id != receivable.sheet_id {
            let candidate = description.as_deref().unwrap_or(&receivable.description);
            check_description::<accounts_receivable::Entity, _>(
                &self.db,
                target_sheet_id,
                candidate,
                Some(id),
            )
            .await?;
        }

        let mut active: accounts_receivable::ActiveModel = receivable.into();
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

    /// Deletes one of the actor's receivables.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Unauthorized` per ownership, or an error if the
    /// delete fails.
    pub async fn remove(&self, actor_id: i32, id: i32) -> StoreResult<accounts_receivable::Model> {
        resolve_actor(&self.db, actor_id).await?;
        let receivable = self.authorized(actor_id, Action::Delete, id).await?;

        receivable.clone().delete(&self.db).await?;
        Ok(receivable)
    }

    /// Copies one of the actor's receivables into the same sheet.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Unauthorized` per ownership, or
    /// `AppError::Internal` if the insert fails.
    pub async fn duplicate(&self, actor_id: i32, id: i32) -> StoreResult<accounts_receivable::Model> {
        resolve_actor(&self.db, actor_id).await?;
        let source = self.authorized(actor_id, Action::Duplicate, id).await?;

        let existing =
            descriptions_in::<accounts_receivable::Entity, _>(&self.db, source.sheet_id, None).await?;
        let description = generate_duplicate_description(&source.description, &existing);

        let now = Utc::now().into();
        let inserted = accounts_receivable::ActiveModel {
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
            tracing::error!(user_id = actor_id, sheet_id = source.sheet_id, error = %e, "account receivable duplication failed");
            AppError::Internal("error duplicating account receivable".to_string()).into()
        })
    }

    async fn authorized(
        &self,
        actor_id: i32,
        action: Action,
        id: i32,
    ) -> StoreResult<accounts_receivable::Model> {
        authorized_entry::<accounts_receivable::Entity, _>(&self.db, actor_id, action, id).await
    }
}
