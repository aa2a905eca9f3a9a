//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use smartbudget_db::entities::users;
use smartbudget_db::migration::Migrator;
use smartbudget_db::{CreateUserInput, UserRepository};
use smartbudget_shared::DatabaseConfig;

/// Fresh in-memory database with the full schema.
///
/// A single pooled connection keeps every query on the same in-memory file.
pub async fn setup_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    let db = smartbudget_db::connect(&config)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

/// Inserts a user with a placeholder hash.
pub async fn create_user(db: &DatabaseConnection, email: &str) -> users::Model {
    UserRepository::new(db.clone())
        .create(CreateUserInput {
            email: email.to_string(),
            name: "User 1".to_string(),
            password_hash: "$argon2id$test_hash".to_string(),
        })
        .await
        .expect("Failed to create user")
}
