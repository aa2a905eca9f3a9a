//! JWT token generation and validation.
//!
//! One signing key issues three kinds of tokens that differ only in lifetime:
//! session access tokens, email confirmation tokens, and recovery tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::auth::Claims;
use crate::config::JwtSettings;
use crate::error::AppError;

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token lifetime.
    pub access_token_ttl: Duration,
    /// Email confirmation token lifetime.
    pub email_token_ttl: Duration,
    /// Password recovery token lifetime.
    pub recovery_token_ttl: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            access_token_ttl: Duration::days(1),
            email_token_ttl: Duration::hours(1),
            recovery_token_ttl: Duration::hours(1),
        }
    }
}

impl From<&JwtSettings> for JwtConfig {
    #[allow(clippy::cast_possible_wrap)]
    fn from(settings: &JwtSettings) -> Self {
        Self {
            secret: settings.secret.clone(),
            access_token_ttl: Duration::seconds(settings.access_token_expiry_secs as i64),
            email_token_ttl: Duration::seconds(settings.email_token_expiry_secs as i64),
            recovery_token_ttl: Duration::seconds(settings.recovery_token_expiry_secs as i64),
        }
    }
}

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

impl From<JwtError> for AppError {
    fn from(e: JwtError) -> Self {
        match e {
            JwtError::EncodingError(msg) => {
                tracing::error!(error = %msg, "failed to sign token");
                Self::Internal("error generating token".to_string())
            }
            JwtError::Expired => Self::Unauthorized("token has expired".to_string()),
            JwtError::DecodingError(_) => Self::Unauthorized("invalid token".to_string()),
        }
    }
}

/// JWT service for token operations.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_ttl", &self.config.access_token_ttl)
            .field("email_token_ttl", &self.config.email_token_ttl)
            .field("recovery_token_ttl", &self.config.recovery_token_ttl)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generates a session access token for a user.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_access_token(&self, user_id: i32) -> Result<String, JwtError> {
        self.generate_token_with_ttl(user_id, self.config.access_token_ttl)
    }

    /// Generates the token embedded in the email confirmation link.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_email_token(&self, user_id: i32) -> Result<String, JwtError> {
        self.generate_token_with_ttl(user_id, self.config.email_token_ttl)
    }

    /// Generates the token embedded in the password recovery link.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_recovery_token(&self, user_id: i32) -> Result<String, JwtError> {
        self.generate_token_with_ttl(user_id, self.config.recovery_token_ttl)
    }

    /// Generates a token with an explicit lifetime.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_token_with_ttl(&self, user_id: i32, ttl: Duration) -> Result<String, JwtError> {
        let claims = Claims::new(user_id, Utc::now() + ttl);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates and decodes a token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::DecodingError` if the token is malformed or forged.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }

    /// Returns the access token expiration in seconds.
    #[must_use]
    pub const fn access_token_expires_in(&self) -> i64 {
        self.config.access_token_ttl.num_seconds()
    }
}
