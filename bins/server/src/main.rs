//! Smart Budget API Server
//!
//! Main entry point for the Smart Budget backend service.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smartbudget_api::{AppState, create_router};
use smartbudget_db::{connect, migration::Migrator};
use smartbudget_shared::{AppConfig, EmailService, JwtConfig, JwtService, parse_timezone};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smartbudget=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let timezone = parse_timezone(&config.app.timezone)?;

    let db = connect(&config.database)
        .await
        .context("failed to connect to database")?;
    info!("Connected to database");

    if config.server.run_migrations {
        Migrator::up(&db, None)
            .await
            .context("failed to run migrations")?;
        info!("Migrations applied");
    }

    let jwt_service = JwtService::new(JwtConfig::from(&config.jwt));

    let email_service = EmailService::new(config.email.clone());
    info!(
        smtp_host = %config.email.smtp_host,
        smtp_port = %config.email.smtp_port,
        "Email service configured"
    );

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        frontend_url: Arc::from(email_service.frontend_url()),
        mailer: Arc::new(email_service),
        timezone,
    };

    let app = create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, timezone = %timezone, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
