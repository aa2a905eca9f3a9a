//! Transactional email.
//!
//! `EmailService` talks SMTP through `lettre`. Callers depend on the `Mailer`
//! trait so tests can swap in a recording double.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::config::EmailConfig;

/// Email service errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Failed to build email message.
    #[error("Failed to build email: {0}")]
    BuildError(String),
    /// Failed to send email.
    #[error("Failed to send email: {0}")]
    SendError(String),
    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// A rendered message ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
}

impl OutgoingMail {
    /// Account confirmation message pointing at `{frontend_url}/account/confirm`.
    #[must_use]
    pub fn confirmation(to: &str, name: &str, frontend_url: &str, token: &str) -> Self {
        let link = format!("{frontend_url}/account/confirm?token={token}");
        Self {
            to: to.to_string(),
            subject: "Smart Budget - Confirmação de email".to_string(),
            html_body: render_template(
                name,
                "Agradecemos por testar nosso aplicativo! Para confirmar sua conta, clique no botão abaixo:",
                &link,
                "Confirmar Email",
                "O link de confirmação é válido por 1 hora.",
            ),
        }
    }

    /// Password recovery message pointing at `{frontend_url}/account/recover`.
    #[must_use]
    pub fn recovery(to: &str, name: &str, frontend_url: &str, token: &str) -> Self {
        let link = format!("{frontend_url}/account/recover?token={token}");
        Self {
            to: to.to_string(),
            subject: "Smart Budget - Recuperação de senha".to_string(),
            html_body: render_template(
                name,
                "Recebemos uma solicitação para redefinir a sua senha. Para continuar, clique no botão abaixo:",
                &link,
                "Redefinir Senha",
                "O link de recuperação é válido por 1 hora.",
            ),
        }
    }
}

fn render_template(name: &str, intro: &str, link: &str, button: &str, footer: &str) -> String {
    format!(
        r#"<div style="color:#1c1d1f;font-family:Helvetica,Arial,sans-serif;font-size:16px;line-height:1.4">
  <table width="100%" cellpadding="0" cellspacing="0" style="background-color:#f7f9fa;padding:24px">
    <tr><td style="border-bottom:1px solid #cccccc;padding:20px;font-size:25px"><strong>Smart Budget</strong></td></tr>
    <tr><td style="padding:24px 24px 0 24px"><p>Olá, {name},</p><p>{intro}</p></td></tr>
    <tr><td style="padding:16px 24px 0 24px">
      <a href="{link}" style="background:#0f42a8;color:#fff;display:inline-block;padding:14px 12px;text-decoration:none;font-weight:700" target="_blank">{button}</a>
    </td></tr>
    <tr><td style="padding:16px 24px 0 24px"><p>{footer}</p></td></tr>
    <tr><td style="padding:24px 24px 0 24px"><p style="font-size:14px">Se você não fez esta solicitação, desconsidere este email.</p></td></tr>
  </table>
</div>"#
    )
}

/// Outcome of a send attempt.
///
/// Transport failures are reported here with `sent == false` instead of as
/// errors; callers decide whether a failed send aborts the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailReceipt {
    /// Whether the relay accepted the message.
    pub sent: bool,
    /// Relay response or failure description.
    pub info: String,
}

/// Anything that can deliver an `OutgoingMail`.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers the message.
    async fn send_mail(&self, mail: OutgoingMail) -> MailReceipt;
}

/// SMTP mailer.
#[derive(Debug, Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new email service.
    #[must_use]
    pub const fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Base URL that links in emails point to.
    #[must_use]
    pub fn frontend_url(&self) -> &str {
        &self.config.frontend_url
    }

    fn create_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
            .map_err(|e| EmailError::SendError(e.to_string()))?
            .port(self.config.smtp_port);

        if self.config.smtp_username.is_empty() {
            return Ok(builder.build());
        }

        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );
        Ok(builder.credentials(creds).build())
    }

    fn build_message(&self, mail: OutgoingMail) -> Result<Message, EmailError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        Message::builder()
            .from(
                from.parse()
                    .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?,
            )
            .to(mail
                .to
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?)
            .subject(mail.subject)
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body)
            .map_err(|e| EmailError::BuildError(e.to_string()))
    }

    /// Builds and sends a message.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be built or the relay rejects it.
    pub async fn try_send(&self, mail: OutgoingMail) -> Result<String, EmailError> {
        let message = self.build_message(mail)?;
        let transport = self.create_transport()?;

        let response = transport
            .send(message)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        Ok(response.message().collect::<Vec<_>>().join(" "))
    }
}

#[async_trait]
impl Mailer for EmailService {
    async fn send_mail(&self, mail: OutgoingMail) -> MailReceipt {
        let to = mail.to.clone();
        match self.try_send(mail).await {
            Ok(info) => {
                tracing::debug!(to = %to, "email sent");
                MailReceipt { sent: true, info }
            }
            Err(e) => {
                tracing::error!(to = %to, error = %e, "failed to send email");
                MailReceipt {
                    sent: false,
                    info: e.to_string(),
                }
            }
        }
    }
}
