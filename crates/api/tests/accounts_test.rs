//! HTTP tests for the account payable and receivable routes.

mod common;

use axum::http::{Method, StatusCode};
use rstest::rstest;
use rust_decimal::Decimal;
use serde_json::json;

use common::spawn_app;

#[rstest]
#[case("/accounts-payable", "account payable", "accountPayableId")]
#[case("/accounts-receivable", "account receivable", "accountReceivableId")]
#[tokio::test]
async fn test_entry_lifecycle(#[case] base: &str, #[case] noun: &str, #[case] id_label: &str) {
    let app = spawn_app().await;
    let (user, token) = app.confirmed_user("user@user.com.br").await;
    let sheet_id = app.create_sheet(&token, "Sheet 1").await;

    let (status, created) = app
        .send(
            Method::POST,
            base,
            Some(&token),
            Some(json!({ "description": "Internet", "value": 99.9, "sheetId": sheet_id })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    let value: Decimal = created["value"].as_str().unwrap().parse().unwrap();
    assert_eq!(value, Decimal::new(999, 1));
    assert_eq!(created["creatorUserId"], user.id);
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app
        .send(
            Method::POST,
            base,
            Some(&token),
            Some(json!({ "description": "internet", "value": 1, "sheetId": sheet_id })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], format!("this {noun} already exists: internet"));

    let (status, detail) = app
        .send(Method::GET, &format!("{base}/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["sheet"]["id"], sheet_id);
    assert_eq!(detail["sheet"]["description"], "Sheet 1");

    let (status, updated) = app
        .send(
            Method::PATCH,
            &format!("{base}/{id}"),
            Some(&token),
            Some(json!({ "value": "120.00" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "Internet");

    let (status, copy) = app
        .send(Method::POST, &format!("{base}/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(copy["description"], "Internet (Cópia 1)");

    let (status, removed) = app
        .send(Method::DELETE, &format!("{base}/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["id"], id);

    let (status, body) = app
        .send(Method::DELETE, &format!("{base}/999999"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("not found {id_label}: 999999"));
}

#[rstest]
#[case("/accounts-payable")]
#[case("/accounts-receivable")]
#[tokio::test]
async fn test_list_filters_by_sheet(#[case] base: &str) {
    let app = spawn_app().await;
    let (_, token) = app.confirmed_user("user@user.com.br").await;
    let first = app.create_sheet(&token, "Sheet 1").await;
    let second = app.create_sheet(&token, "Sheet 2").await;

    for (description, sheet_id) in [("A", first), ("B", first), ("C", second)] {
        app.send(
            Method::POST,
            base,
            Some(&token),
            Some(json!({ "description": description, "value": 10, "sheetId": sheet_id })),
        )
        .await;
    }

    let (status, all) = app.send(Method::GET, base, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (status, filtered) = app
        .send(
            Method::GET,
            &format!("{base}?sheetId={first}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let descriptions: Vec<&str> = filtered
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["description"].as_str().unwrap())
        .collect();
    assert_eq!(descriptions, vec!["B", "A"]);

    let (status, body) = app
        .send(Method::GET, &format!("{base}?sheetId=abc"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid sheetId");
}

#[tokio::test]
async fn test_create_entry_in_foreign_sheet() {
    let app = spawn_app().await;
    let (_, owner_token) = app.confirmed_user("owner@user.com.br").await;
    let (_, intruder_token) = app.confirmed_user("intruder@user.com.br").await;
    let sheet_id = app.create_sheet(&owner_token, "Sheet 1").await;

    let (status, _) = app
        .send(
            Method::POST,
            "/accounts-payable",
            Some(&intruder_token),
            Some(json!({ "description": "Luz", "value": 10, "sheetId": sheet_id })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(
            Method::POST,
            "/accounts-receivable",
            Some(&owner_token),
            Some(json!({ "description": "Luz", "value": 10, "sheetId": 999_999 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "not found sheetId: 999999");
}
