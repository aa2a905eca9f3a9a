//! Shared errors, configuration, tokens, and mail for Smart Budget.
//!
//! This crate provides the pieces every other crate leans on:
//! - Application-wide error taxonomy
//! - Configuration management
//! - JWT issuing and validation
//! - Transactional email over SMTP
//! - Timezone-aware timestamp rendering

pub mod auth;
pub mod config;
pub mod email;
pub mod error;
pub mod jwt;
pub mod timezone;

pub use auth::Claims;
pub use config::{AppConfig, AppSettings, DatabaseConfig, EmailConfig, JwtSettings, ServerConfig};
pub use email::{EmailError, EmailService, MailReceipt, Mailer, OutgoingMail};
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use timezone::{format_in_timezone, parse_timezone};
