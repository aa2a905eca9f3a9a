//! Integration tests for AccountsReceivable repository.

mod common;

use rust_decimal_macros::dec;
use smartbudget_db::{
    AccountReceivableRepository, CreateEntryInput, CreateSheetInput, SheetRepository,
    UpdateEntryInput,
};
use smartbudget_shared::AppError;

use common::{create_user, setup_db};

#[tokio::test]
async fn test_receivable_lifecycle() {
    let db = setup_db().await;
    let user = create_user(&db, "user@user.com.br").await;
    let sheet = SheetRepository::new(db.clone())
        .create(
            user.id,
            CreateSheetInput {
                description: "Sheet 1".to_string(),
            },
        )
        .await
        .unwrap();
    let repo = AccountReceivableRepository::new(db.clone());

    let created = repo
        .create(
            user.id,
            CreateEntryInput {
                description: "Salário".to_string(),
                value: dec!(3500),
                sheet_id: sheet.id,
            },
        )
        .await
        .unwrap();

    let detail = repo.find_one(user.id, created.id).await.unwrap();
    assert_eq!(detail.receivable.description, "Salário");
    assert_eq!(detail.sheet.id, sheet.id);

    let updated = repo
        .update(
            user.id,
            created.id,
            UpdateEntryInput {
                description: Some("Salário março".to_string()),
                value: Some(dec!(3600.75)),
                sheet_id: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.description, "Salário março");
    assert_eq!(updated.value, dec!(3600.75));

    let removed = repo.remove(user.id, created.id).await.unwrap();
    assert_eq!(removed.id, created.id);
    assert!(repo.find_all(user.id, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_receivable_description_unique_within_sheet() {
    let db = setup_db().await;
    let user = create_user(&db, "user@user.com.br").await;
    let sheet = SheetRepository::new(db.clone())
        .create(
            user.id,
            CreateSheetInput {
                description: "Sheet 1".to_string(),
            },
        )
        .await
        .unwrap();
    let repo = AccountReceivableRepository::new(db.clone());
    let input = CreateEntryInput {
        description: "Freela".to_string(),
        value: dec!(10),
        sheet_id: sheet.id,
    };
    repo.create(user.id, input.clone()).await.unwrap();

    let err = repo.create(user.id, input).await.unwrap_err();

    assert_eq!(
        err.as_app(),
        Some(&AppError::Conflict(
            "this account receivable already exists: Freela".into()
        ))
    );
}

#[tokio::test]
async fn test_receivable_access_by_other_user() {
    let db = setup_db().await;
    let owner = create_user(&db, "owner@user.com.br").await;
    let intruder = create_user(&db, "intruder@user.com.br").await;
    let sheet = SheetRepository::new(db.clone())
        .create(
            owner.id,
            CreateSheetInput {
                description: "Sheet 1".to_string(),
            },
        )
        .await
        .unwrap();
    let repo = AccountReceivableRepository::new(db.clone());
    let receivable = repo
        .create(
            owner.id,
            CreateEntryInput {
                description: "Freela".to_string(),
                value: dec!(10),
                sheet_id: sheet.id,
            },
        )
        .await
        .unwrap();

    let err = repo.remove(intruder.id, receivable.id).await.unwrap_err();
    assert_eq!(
        err.as_app(),
        Some(&AppError::Unauthorized(
            "you don't have permission to delete this account receivable".into()
        ))
    );

    // listing a foreign sheet is refused rather than returning nothing
    let err = repo.find_all(intruder.id, Some(sheet.id)).await.unwrap_err();
    assert!(matches!(err.as_app(), Some(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn test_remove_missing_receivable_reports_id() {
    let db = setup_db().await;
    let user = create_user(&db, "user@user.com.br").await;
    let repo = AccountReceivableRepository::new(db.clone());

    let err = repo.remove(user.id, 999_999).await.unwrap_err();

    assert_eq!(
        err.as_app(),
        Some(&AppError::NotFound(
            "not found accountReceivableId: 999999".into()
        ))
    );
}

#[tokio::test]
async fn test_duplicate_receivable() {
    let db = setup_db().await;
    let user = create_user(&db, "user@user.com.br").await;
    let sheet = SheetRepository::new(db.clone())
        .create(
            user.id,
            CreateSheetInput {
                description: "Sheet 1".to_string(),
            },
        )
        .await
        .unwrap();
    let repo = AccountReceivableRepository::new(db.clone());
    let source = repo
        .create(
            user.id,
            CreateEntryInput {
                description: "Freela".to_string(),
                value: dec!(250.5),
                sheet_id: sheet.id,
            },
        )
        .await
        .unwrap();

    let copy = repo.duplicate(user.id, source.id).await.unwrap();

    assert_eq!(copy.description, "Freela (Cópia 1)");
    assert_eq!(copy.value, dec!(250.5));
    assert_eq!(copy.sheet_id, sheet.id);
}

#[tokio::test]
async fn test_duplicate_receivable_skips_case_variant() {
    let db = setup_db().await;
    let user = create_user(&db, "user@user.com.br").await;
    let sheet = SheetRepository::new(db.clone())
        .create(
            user.id,
            CreateSheetInput {
                description: "Sheet 1".to_string(),
            },
        )
        .await
        .unwrap();
    let repo = AccountReceivableRepository::new(db.clone());
    let mut created = Vec::new();
    for description in ["Freela", "FREELA (CÓPIA 1)"] {
        let receivable = repo
            .create(
                user.id,
                CreateEntryInput {
                    description: description.to_string(),
                    value: dec!(10),
                    sheet_id: sheet.id,
                },
            )
            .await
            .unwrap();
        created.push(receivable);
    }

    let copy = repo.duplicate(user.id, created[0].id).await.unwrap();

    assert_eq!(copy.description, "Freela (Cópia 2)");
}
