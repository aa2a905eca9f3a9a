//! Shared fixtures for HTTP tests.

#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use smartbudget_api::{AppState, create_router};
use smartbudget_core::auth::hash_password;
use smartbudget_db::{CreateUserInput, UserRepository, entities::users, migration::Migrator};
use smartbudget_shared::{
    DatabaseConfig, JwtConfig, JwtService, MailReceipt, Mailer, OutgoingMail,
};
use tower::ServiceExt;

pub const PASSWORD: &str = "secret123";

/// Mailer double that keeps every message it is asked to send.
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
    accept: bool,
}

impl RecordingMailer {
    fn new(accept: bool) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            accept,
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }

    /// Waits for mail handed to a background task.
    pub async fn wait_for(&self, count: usize) -> Vec<OutgoingMail> {
        for _ in 0..100 {
            let sent = self.sent();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_mail(&self, mail: OutgoingMail) -> MailReceipt {
        self.sent.lock().unwrap().push(mail);
        MailReceipt {
            sent: self.accept,
            info: if self.accept { "250 OK" } else { "relay refused" }.to_string(),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
}

pub async fn spawn_app() -> TestApp {
    build_app(true).await
}

/// App whose mailer rejects every message.
pub async fn spawn_app_with_failing_mailer() -> TestApp {
    build_app(false).await
}

async fn build_app(accept: bool) -> TestApp {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    let db = smartbudget_db::connect(&config)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    let mailer = Arc::new(RecordingMailer::new(accept));
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
        mailer: mailer.clone(),
        frontend_url: Arc::from("http://localhost:3000"),
        timezone: chrono_tz::America::Sao_Paulo,
    };

    TestApp {
        router: create_router(state.clone(), Duration::from_secs(30)),
        state,
        mailer,
    }
}

impl TestApp {
    /// Sends one request and returns the status with the parsed JSON body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new((*self.state.db).clone())
    }

    /// Inserts a user with a confirmed email and returns it with an access token.
    pub async fn confirmed_user(&self, email: &str) -> (users::Model, String) {
        let repo = self.users();
        let user = repo
            .create(CreateUserInput {
                email: email.to_string(),
                name: "User 1".to_string(),
                password_hash: hash_password(PASSWORD).unwrap(),
            })
            .await
            .unwrap();
        let user = repo.mark_email_validated(user).await.unwrap();
        let token = self.state.jwt_service.generate_access_token(user.id).unwrap();
        (user, token)
    }

    /// Creates a sheet through the API and returns its id.
    pub async fn create_sheet(&self, token: &str, description: &str) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/sheets",
                Some(token),
                Some(serde_json::json!({ "description": description })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}
