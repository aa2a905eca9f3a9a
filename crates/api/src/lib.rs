//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for users, sheets and accounts
//! - Authentication middleware
//! - The account service behind the user routes
//! - JSON error rendering

pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{StatusCode, header::AUTHORIZATION},
};
use chrono_tz::Tz;
use sea_orm::DatabaseConnection;
use smartbudget_shared::{JwtService, Mailer};
use tower_http::{
    cors::{Any, CorsLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use error::{ApiError, ApiResult};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Outgoing mail delivery.
    pub mailer: Arc<dyn Mailer>,
    /// Base URL that emailed links point to.
    pub frontend_url: Arc<str>,
    /// Zone used to render timestamps in responses.
    pub timezone: Tz,
}

/// Creates the main application router.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        // keep bearer tokens out of request traces
        .layer(SetSensitiveRequestHeadersLayer::new(std::iter::once(
            AUTHORIZATION,
        )))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
