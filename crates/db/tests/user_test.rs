//! Integration tests for User repository.

mod common;

use chrono::{Duration, Utc};
use smartbudget_db::{
    CreateSheetInput, CreateUserInput, SheetRepository, UpdateUserInput, UserRepository,
};
use smartbudget_shared::AppError;

use common::{create_user, setup_db};

#[tokio::test]
async fn test_user_create_and_find_by_id() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());

    let user = create_user(&db, "user@user.com.br").await;

    assert_eq!(user.email, "user@user.com.br");
    assert!(!user.email_validated);
    assert!(user.email_validated_at.is_none());

    let found = repo
        .find_by_id(user.id)
        .await
        .expect("Failed to find user")
        .expect("User should exist");
    assert_eq!(found.id, user.id);
}

#[tokio::test]
async fn test_user_find_by_email() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());
    let user = create_user(&db, "user@user.com.br").await;

    let found = repo
        .find_by_email("user@user.com.br")
        .await
        .expect("Failed to find user")
        .expect("User should exist");
    assert_eq!(found.id, user.id);

    let missing = repo.find_by_email("nonexistent@example.com").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());
    create_user(&db, "user@user.com.br").await;

    let err = repo
        .create(CreateUserInput {
            email: "user@user.com.br".to_string(),
            name: "Other".to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(
        err.as_app(),
        Some(&AppError::Conflict(
            "this email already exists: user@user.com.br".into()
        ))
    );
}

#[tokio::test]
async fn test_mark_email_validated() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());
    let user = create_user(&db, "user@user.com.br").await;

    let validated = repo.mark_email_validated(user).await.unwrap();

    assert!(validated.email_validated);
    assert!(validated.email_validated_at.is_some());
}

#[tokio::test]
async fn test_set_recover_sent_at() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());
    let user = create_user(&db, "user@user.com.br").await;
    let sent_at = Utc::now() - Duration::minutes(2);

    let updated = repo.set_recover_sent_at(user, sent_at).await.unwrap();

    let stored = updated.recover_sent_at.expect("timestamp should be set");
    assert_eq!(stored.timestamp(), sent_at.timestamp());
}

#[tokio::test]
async fn test_update_profile_rejects_taken_email() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());
    let first = create_user(&db, "first@user.com.br").await;
    create_user(&db, "second@user.com.br").await;

    let err = repo
        .update_profile(
            first.clone(),
            UpdateUserInput {
                email: Some("second@user.com.br".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err.as_app(), Some(AppError::Conflict(_))));

    // keeping one's own email is not a conflict
    let renamed = repo
        .update_profile(
            first,
            UpdateUserInput {
                email: Some("first@user.com.br".to_string()),
                name: Some("Renamed".to_string()),
                password_hash: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Renamed");
}

#[tokio::test]
async fn test_delete_user_cascades_to_sheets() {
    let db = setup_db().await;
    let users = UserRepository::new(db.clone());
    let sheets = SheetRepository::new(db.clone());
    let user = create_user(&db, "user@user.com.br").await;
    let other = create_user(&db, "other@user.com.br").await;

    let sheet = sheets
        .create(
            user.id,
            CreateSheetInput {
                description: "Sheet 1".to_string(),
            },
        )
        .await
        .unwrap();

    users.delete(user).await.unwrap();

    // the sheet went with its owner
    let err = sheets.find_one(other.id, sheet.id).await.unwrap_err();
    assert!(matches!(err.as_app(), Some(AppError::NotFound(_))));
}
