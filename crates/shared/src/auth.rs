//! Authentication types for JWT and the account endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// JWT claims carried by every token the API issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: i32,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: i32, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID.
    #[must_use]
    pub const fn user_id(&self) -> i32 {
        self.sub
    }
}

/// Signup request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    /// User email.
    #[validate(email(message = "invalid email"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Plaintext password.
    #[validate(length(min = 4, message = "password must be at least 4 characters"))]
    pub password: String,
}

/// Signin request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SigninRequest {
    /// User email.
    #[validate(email(message = "invalid email"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 4, message = "invalid password"))]
    pub password: String,
}

/// Signin response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    /// User ID.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// User email.
    pub email: String,
    /// Access token for the bearer header.
    pub jwt_token: String,
}

/// Password recovery request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecoverPasswordRequest {
    /// Email of the account to recover.
    pub email: Option<String>,
}

/// Resend of the account confirmation email.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResendValidationEmailRequest {
    /// Email of the account to confirm.
    #[validate(email(message = "invalid email"))]
    pub email: String,
}

/// Password change for the token's user.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePasswordRequest {
    /// Must match the token user's email.
    pub email: String,
    /// New plaintext password.
    pub password: Option<String>,
}

/// Check that the submitted data belongs to the token's user.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ValidateDataRequest {
    /// Email to compare.
    #[validate(email(message = "invalid email"))]
    pub email: Option<String>,
    /// Name to compare.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
}

/// Profile update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New email.
    #[validate(email(message = "invalid email"))]
    pub email: Option<String>,
    /// New display name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    /// New plaintext password.
    #[validate(length(min = 4, message = "password must be at least 4 characters"))]
    pub password: Option<String>,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_new_sets_correct_fields() {
        let before = Utc::now().timestamp();
        let expires_at = Utc::now() + Duration::hours(1);

        let claims = Claims::new(7, expires_at);

        assert_eq!(claims.user_id(), 7);
        assert!(claims.iat >= before);
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_signup_request_validation() {
        let ok = SignupRequest {
            email: "user@user.com.br".into(),
            name: "User 1".into(),
            password: "1234".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = SignupRequest {
            email: "not-an-email".into(),
            name: String::new(),
            password: "123".into(),
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 3);
    }

    #[test]
    fn test_signin_response_uses_camel_case() {
        let response = SigninResponse {
            id: 1,
            name: "User 1".into(),
            email: "user@user.com.br".into(),
            jwt_token: "token".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["jwtToken"], "token");
    }

    #[test]
    fn test_validate_data_accepts_absent_fields() {
        assert!(ValidateDataRequest::default().validate().is_ok());
    }
}
