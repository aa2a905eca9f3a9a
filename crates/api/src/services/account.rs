//! Account flows: signup, signin, email confirmation, password recovery and
//! self-service profile changes.

use std::sync::Arc;

use chrono::Utc;
use smartbudget_core::{
    access::{Action, authorize},
    auth::{hash_password, recovery_cooldown_active, validate_new_password, verify_password},
};
use smartbudget_db::{CreateUserInput, UpdateUserInput, UserRepository, entities::users};
use smartbudget_shared::{
    AppError, AppResult, JwtService, Mailer, OutgoingMail,
    auth::{
        MessageResponse, RecoverPasswordRequest, SigninRequest, SigninResponse, SignupRequest,
        UpdatePasswordRequest, UpdateUserRequest, ValidateDataRequest,
    },
};

use crate::AppState;

const MAIL_FAILURE: &str = "Internal Server Error - Error sending e-mail";
const EMAIL_MISMATCH: &str = "this email does not belong to this userToken";

/// Account operations behind the `/users` routes.
pub struct AccountService {
    users: UserRepository,
    jwt: Arc<JwtService>,
    mailer: Arc<dyn Mailer>,
    frontend_url: Arc<str>,
}

impl AccountService {
    /// Builds the service from shared state.
    pub fn from_state(state: &AppState) -> Self {
        Self {
            users: UserRepository::new((*state.db).clone()),
            jwt: Arc::clone(&state.jwt_service),
            mailer: Arc::clone(&state.mailer),
            frontend_url: Arc::clone(&state.frontend_url),
        }
    }

    /// Registers a new user and mails the confirmation link in the background.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Conflict` if the email is already registered.
    pub async fn signup(&self, input: SignupRequest) -> AppResult<users::Model> {
        let email = input.email.trim().to_string();
        if self.users.email_exists(&email).await? {
            return Err(AppError::Conflict(format!("this email already exists: {email}")));
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .users
            .create(CreateUserInput {
                email,
                name: input.name.trim().to_string(),
                password_hash,
            })
            .await?;

        let token = self.jwt.generate_email_token(user.id)?;
        let mail = OutgoingMail::confirmation(&user.email, &user.name, &self.frontend_url, &token);
        let mailer = Arc::clone(&self.mailer);
        let user_id = user.id;
        tokio::spawn(async move {
            let receipt = mailer.send_mail(mail).await;
            if !receipt.sent {
                tracing::error!(user_id, info = %receipt.info, "confirmation email not sent");
            }
        });

        tracing::info!(user_id = user.id, "user signed up");
        Ok(user)
    }

    /// Checks credentials and issues an access token.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` for unknown emails, wrong passwords
    /// and unconfirmed emails.
    pub async fn signin(&self, input: SigninRequest) -> AppResult<SigninResponse> {
        let invalid = || AppError::Unauthorized("Invalid Credentials".to_string());

        let user = self
            .users
            .find_by_email(input.email.trim())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&input.password, &user.password_hash)? {
            tracing::info!(user_id = user.id, "failed signin - invalid password");
            return Err(invalid());
        }

        if !user.email_validated {
            return Err(AppError::Unauthorized(
                "email not validated. validate the email before logging in".to_string(),
            ));
        }

        let jwt_token = self.jwt.generate_access_token(user.id)?;
        tracing::info!(user_id = user.id, "user signed in");

        Ok(SigninResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            jwt_token,
        })
    }

    /// Confirms the email of the user the emailed token was issued to.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if the subject no longer exists and
    /// `AppError::BadRequest` if the email was already confirmed.
    pub async fn confirm_email(&self, actor_id: i32) -> AppResult<MessageResponse> {
        let user = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid token".to_string()))?;

        if user.email_validated {
            return Err(AppError::BadRequest("email already confirmed".to_string()));
        }

        self.users.mark_email_validated(user).await?;
        tracing::info!(user_id = actor_id, "email confirmed");

        Ok(MessageResponse::new("email confirmed successfully"))
    }

    /// Sends the confirmation link again and waits for the relay.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for unknown emails, `AppError::BadRequest`
    /// if already confirmed, and `AppError::Internal` if the mail is not sent.
    pub async fn resend_validation_email(&self, email: &str) -> AppResult<MessageResponse> {
        let email = email.trim();
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("not found user by email: {email}")))?;

        if user.email_validated {
            return Err(AppError::BadRequest("email already confirmed".to_string()));
        }

        let token = self.jwt.generate_email_token(user.id)?;
        let mail = OutgoingMail::confirmation(&user.email, &user.name, &self.frontend_url, &token);
        self.deliver(user.id, mail).await?;

        Ok(MessageResponse::new("email successfully sent"))
    }

    /// Mails a password recovery link, at most once every five minutes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` without an email or inside the cooldown,
    /// `AppError::NotFound` for unknown emails, and `AppError::Internal` if
    /// the mail is not sent.
    pub async fn recover_password(&self, input: RecoverPasswordRequest) -> AppResult<MessageResponse> {
        let email = input
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::BadRequest("email not sent".to_string()))?;

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("not found user by email: {email}")))?;

        let now = Utc::now();
        let last_sent = user.recover_sent_at.map(|at| at.with_timezone(&Utc));
        if recovery_cooldown_active(last_sent, now) {
            return Err(AppError::BadRequest(
                "A password reset email has already been sent in less than 5 minutes.".to_string(),
            ));
        }

        let token = self.jwt.generate_recovery_token(user.id)?;
        let mail = OutgoingMail::recovery(&user.email, &user.name, &self.frontend_url, &token);
        self.deliver(user.id, mail).await?;

        self.users.set_recover_sent_at(user, now).await?;

        Ok(MessageResponse::new("sent password recovery"))
    }

    /// Sets a new password for the token's user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the subject is gone and
    /// `AppError::BadRequest` for a foreign email or a rejected password.
    pub async fn update_password(
        &self,
        actor_id: i32,
        input: UpdatePasswordRequest,
    ) -> AppResult<users::Model> {
        let user = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("not found user".to_string()))?;

        if input.email.trim() != user.email {
            return Err(AppError::BadRequest(EMAIL_MISMATCH.to_string()));
        }

        let password = validate_new_password(input.password.as_deref())?;
        let password_hash = hash_password(password)?;
        let user = self.users.update_password(user, password_hash).await?;
        tracing::info!(user_id = actor_id, "password updated");

        Ok(user)
    }

    /// Checks that the given email and name belong to the token's user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` on any mismatch.
    pub async fn validate_data(
        &self,
        actor_id: i32,
        input: ValidateDataRequest,
    ) -> AppResult<MessageResponse> {
        let user = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("user not found".to_string()))?;

        if input.email.as_deref().is_some_and(|e| e.trim() != user.email) {
            return Err(AppError::BadRequest(EMAIL_MISMATCH.to_string()));
        }
        if input.name.as_deref().is_some_and(|n| n.trim() != user.name) {
            return Err(AppError::BadRequest(
                "this name does not belong to this userToken".to_string(),
            ));
        }

        Ok(MessageResponse::new("successfully validated data"))
    }

    /// Returns the user, which must be the actor.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` or `AppError::Unauthorized`.
    pub async fn find_user(&self, actor_id: i32, id: i32) -> AppResult<users::Model> {
        let found = self.users.find_by_id(id).await?;
        Ok(authorize(actor_id, Action::Access, id, found)?)
    }

    /// Updates the actor's own profile.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound`, `AppError::Unauthorized`, or
    /// `AppError::Conflict` if the new email belongs to someone else.
    pub async fn update_user(
        &self,
        actor_id: i32,
        id: i32,
        input: UpdateUserRequest,
    ) -> AppResult<users::Model> {
        let user = self.find_user(actor_id, id).await?;

        let password_hash = input.password.as_deref().map(hash_password).transpose()?;
        let user = self
            .users
            .update_profile(
                user,
                UpdateUserInput {
                    email: input.email.map(|e| e.trim().to_string()),
                    name: input.name.map(|n| n.trim().to_string()),
                    password_hash,
                },
            )
            .await?;

        Ok(user)
    }

    /// Deletes the actor's own account.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` or `AppError::Unauthorized`.
    pub async fn remove_user(&self, actor_id: i32, id: i32) -> AppResult<users::Model> {
        let user = self.find_user(actor_id, id).await?;
        Ok(self.users.delete(user).await?)
    }

    async fn deliver(&self, user_id: i32, mail: OutgoingMail) -> AppResult<()> {
        let receipt = self.mailer.send_mail(mail).await;
        if receipt.sent {
            Ok(())
        } else {
            tracing::error!(user_id, info = %receipt.info, "email not sent");
            Err(AppError::Internal(MAIL_FAILURE.to_string()))
        }
    }
}
