//! Sheet repository.
//!
//! Sheets are owned by one user and hold payable and receivable line items.
//! Duplicating a sheet copies every line item inside one transaction.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use smartbudget_core::access::{Action, ResourceKind};
use smartbudget_core::sheet::{
    SheetTotals, compute_balance, ensure_unique_description, generate_duplicate_description,
    normalize_description,
};
use smartbudget_shared::AppError;

use super::{owned_sheet, resolve_actor};
use crate::entities::{accounts_payable, accounts_receivable, sheets};
use crate::error::StoreResult;

/// Input for creating a sheet.
#[derive(Debug, Clone)]
pub struct CreateSheetInput {
    /// Description, unique among the owner's sheets.
    pub description: String,
}

/// Input for updating a sheet.
#[derive(Debug, Clone, Default)]
pub struct UpdateSheetInput {
    /// New description.
    pub description: Option<String>,
}

/// A sheet with its line items and derived totals.
#[derive(Debug, Clone)]
pub struct SheetDetail {
    /// Sheet record.
    pub sheet: sheets::Model,
    /// Expense lines.
    pub payables: Vec<accounts_payable::Model>,
    /// Income lines.
    pub receivables: Vec<accounts_receivable::Model>,
    /// Totals and balance.
    pub totals: SheetTotals,
}

/// Sheet repository.
#[derive(Debug, Clone)]
pub struct SheetRepository {
    db: DatabaseConnection,
}

impl SheetRepository {
    /// Creates a new sheet repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a sheet owned by the actor.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The actor no longer exists
    /// - The actor already has a sheet with this description
    /// - Database operation fails
    pub async fn create(&self, actor_id: i32, input: CreateSheetInput) -> StoreResult<sheets::Model> {
        resolve_actor(&self.db, actor_id).await?;

        let description = normalize_description(&input.description);
        let existing = self.descriptions_of(actor_id, None).await?;
        ensure_unique_description(
            ResourceKind::Sheet,
            &description,
            existing.iter().map(String::as_str),
        )?;

        let now = Utc::now().into();
        let sheet = sheets::ActiveModel {
            description: Set(description),
            creator_user_id: Set(actor_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(user_id = actor_id, sheet_id = sheet.id, "sheet created");
        Ok(sheet)
    }

    /// Lists the actor's sheets, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor no longer exists or the query fails.
    pub async fn find_all(&self, actor_id: i32) -> StoreResult<Vec<sheets::Model>> {
        resolve_actor(&self.db, actor_id).await?;

        Ok(sheets::Entity::find()
            .filter(sheets::Column::CreatorUserId.eq(actor_id))
            .order_by_desc(sheets::Column::CreatedAt)
            .order_by_desc(sheets::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Gets one of the actor's sheets with its line items and balance.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the sheet does not exist, `Unauthorized` if the
    /// actor does not own it, or an error if the query fails.
    pub async fn find_one(&self, actor_id: i32, id: i32) -> StoreResult<SheetDetail> {
        resolve_actor(&self.db, actor_id).await?;
        let sheet = owned_sheet(&self.db, actor_id, Action::Access, id).await?;

        self.load_detail(sheet).await
    }

    /// Renames one of the actor's sheets.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sheet is missing or owned by someone else
    /// - Another of the actor's sheets already has the new description
    /// - Database operation fails
    pub async fn update(
        &self,
        actor_id: i32,
        id: i32,
        input: UpdateSheetInput,
    ) -> StoreResult<sheets::Model> {
        resolve_actor(&self.db, actor_id).await?;
        let sheet = owned_sheet(&self.db, actor_id, Action::Modify, id).await?;

        let mut active: sheets::ActiveModel = sheet.into();

        if let Some(raw) = input.description {
            let description = normalize_description(&raw);
            let existing = self.descriptions_of(actor_id, Some(id)).await?;
            ensure_unique_description(
                ResourceKind::Sheet,
                &description,
                existing.iter().map(String::as_str),
            )?;
            active.description = Set(description);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes one of the actor's sheets and its line items.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Unauthorized` per ownership, or an error if the
    /// delete fails.
    pub async fn remove(&self, actor_id: i32, id: i32) -> StoreResult<sheets::Model> {
        resolve_actor(&self.db, actor_id).await?;
        let sheet = owned_sheet(&self.db, actor_id, Action::Delete, id).await?;

        sheet.clone().delete(&self.db).await?;
        tracing::info!(user_id = actor_id, sheet_id = id, "sheet deleted");
        Ok(sheet)
    }

    /// Copies one of the actor's sheets with all of its line items.
    ///
    /// The copy gets the first free `(Cópia n)` description. The new sheet
    /// and its line items are written in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Unauthorized` per ownership, or
    /// `AppError::Internal` if writing the copy fails.
    pub async fn duplicate(&self, actor_id: i32, id: i32) -> StoreResult<sheets::Model> {
        resolve_actor(&self.db, actor_id).await?;
        let source = owned_sheet(&self.db, actor_id, Action::Duplicate, id).await?;

        let existing = self.descriptions_of(actor_id, None).await?;
        let description = generate_duplicate_description(&source.description, &existing);

        let payables = source
            .find_related(accounts_payable::Entity)
            .order_by_asc(accounts_payable::Column::Id)
            .all(&self.db)
            .await?;
        let receivables = source
            .find_related(accounts_receivable::Entity)
            .order_by_asc(accounts_receivable::Column::Id)
            .all(&self.db)
            .await?;

        let txn = self.db.begin().await?;
        let written = copy_sheet(&txn, actor_id, description, &payables, &receivables).await;
        let copied = match written {
            Ok(sheet) => txn.commit().await.map(|()| sheet),
            Err(e) => {
                if let Err(rollback) = txn.rollback().await {
                    tracing::error!(error = %rollback, "rollback failed");
                }
                Err(e)
            }
        };

        match copied {
            Ok(sheet) => {
                tracing::info!(
                    user_id = actor_id,
                    sheet_id = sheet.id,
                    source_sheet_id = id,
                    "sheet duplicated"
                );
                Ok(sheet)
            }
            Err(e) => {
                tracing::error!(user_id = actor_id, sheet_id = id, error = %e, "sheet duplication failed");
                Err(AppError::Internal("error duplicating sheet".to_string()).into())
            }
        }
    }

    async fn load_detail(&self, sheet: sheets::Model) -> StoreResult<SheetDetail> {
        let payables = sheet
            .find_related(accounts_payable::Entity)
            .order_by_asc(accounts_payable::Column::Id)
            .all(&self.db)
            .await?;
        let receivables = sheet
            .find_related(accounts_receivable::Entity)
            .order_by_asc(accounts_receivable::Column::Id)
            .all(&self.db)
            .await?;

        let totals = compute_balance(
            payables.iter().map(|p| p.value),
            receivables.iter().map(|r| r.value),
        );

        Ok(SheetDetail {
            sheet,
            payables,
            receivables,
            totals,
        })
    }

    /// Descriptions of the actor's sheets, optionally leaving one out.
    async fn descriptions_of(&self, actor_id: i32, except: Option<i32>) -> StoreResult<Vec<String>> {
        let mut query = sheets::Entity::find().filter(sheets::Column::CreatorUserId.eq(actor_id));
        if let Some(id) = except {
            query = query.filter(sheets::Column::Id.ne(id));
        }

        Ok(query
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| s.description)
            .collect())
    }
}

async fn copy_sheet(
    txn: &DatabaseTransaction,
    actor_id: i32,
    description: String,
    payables: &[accounts_payable::Model],
    receivables: &[accounts_receivable::Model],
) -> Result<sheets::Model, DbErr> {
    let now = Utc::now().into();

    let sheet = sheets::ActiveModel {
        description: Set(description),
        creator_user_id: Set(actor_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    if !payables.is_empty() {
        accounts_payable::Entity::insert_many(payables.iter().map(|p| {
            accounts_payable::ActiveModel {
                description: Set(p.description.clone()),
                value: Set(p.value),
                creator_user_id: Set(actor_id),
                sheet_id: Set(sheet.id),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
        }))
        .exec(txn)
        .await?;
    }

    if !receivables.is_empty() {
        accounts_receivable::Entity::insert_many(receivables.iter().map(|r| {
            accounts_receivable::ActiveModel {
                description: Set(r.description.clone()),
                value: Set(r.value),
                creator_user_id: Set(actor_id),
                sheet_id: Set(sheet.id),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
        }))
        .exec(txn)
        .await?;
    }

    Ok(sheet)
}
