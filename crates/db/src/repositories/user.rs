//! User repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set,
};
use smartbudget_shared::AppError;

use crate::entities::users;
use crate::error::StoreResult;

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Argon2 PHC hash.
    pub password_hash: String,
}

/// Profile changes. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    /// New email, must not belong to another user.
    pub email: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New Argon2 PHC hash.
    pub password_hash: Option<String>,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i32) -> StoreResult<Option<users::Model>> {
        Ok(users::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new user with an unconfirmed email.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Conflict` if the email is taken, or an error if the
    /// database insert fails.
    pub async fn create(&self, input: CreateUserInput) -> StoreResult<users::Model> {
        if self.email_exists(&input.email).await? {
            return Err(AppError::Conflict(format!(
                "this email already exists: {}",
                input.email
            ))
            .into());
        }

        let now = Utc::now().into();
        let user = users::ActiveModel {
            email: Set(input.email),
            name: Set(input.name),
            password_hash: Set(input.password_hash),
            email_validated: Set(false),
            email_validated_at: Set(None),
            recover_sent_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let user = user.insert(&self.db).await?;
        tracing::info!(user_id = user.id, "user created");
        Ok(user)
    }

    /// Marks the user's email as confirmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn mark_email_validated(&self, user: users::Model) -> StoreResult<users::Model> {
        let now = Utc::now().into();
        let mut active: users::ActiveModel = user.into();
        active.email_validated = Set(true);
        active.email_validated_at = Set(Some(now));
        active.updated_at = Set(now);

        Ok(active.update(&self.db).await?)
    }

    /// Records when the last recovery email was sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn set_recover_sent_at(
        &self,
        user: users::Model,
        sent_at: DateTime<Utc>,
    ) -> StoreResult<users::Model> {
        let mut active: users::ActiveModel = user.into();
        active.recover_sent_at = Set(Some(sent_at.into()));
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Replaces the stored password hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_password(
        &self,
        user: users::Model,
        password_hash: String,
    ) -> StoreResult<users::Model> {
        let mut active: users::ActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Applies profile changes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Conflict` if the new email belongs to another user,
    /// or an error if the database update fails.
    pub async fn update_profile(
        &self,
        user: users::Model,
        input: UpdateUserInput,
    ) -> StoreResult<users::Model> {
        if let Some(email) = &input.email {
            let owner = self.find_by_email(email).await?;
            if owner.is_some_and(|other| other.id != user.id) {
                return Err(AppError::Conflict(format!("this email already exists: {email}")).into());
            }
        }

        let mut active: users::ActiveModel = user.into();
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(hash) = input.password_hash {
            active.password_hash = Set(hash);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a user. Sheets and their line items go with it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, user: users::Model) -> StoreResult<users::Model> {
        user.clone().delete(&self.db).await?;
        tracing::info!(user_id = user.id, "user deleted");
        Ok(user)
    }
}
