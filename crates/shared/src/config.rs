//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// SMTP configuration.
    #[serde(default)]
    pub email: EmailConfig,
    /// Presentation settings.
    #[serde(default)]
    pub app: AppSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Apply pending migrations on startup.
    #[serde(default)]
    pub run_migrations: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            run_migrations: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_request_timeout() -> u64 {
    30
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT settings as read from configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
    /// Lifetime of the token embedded in the confirmation email.
    #[serde(default = "default_email_token_expiry")]
    pub email_token_expiry_secs: u64,
    /// Lifetime of the token embedded in the password recovery email.
    #[serde(default = "default_recovery_token_expiry")]
    pub recovery_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    86400 // 1 day
}

fn default_email_token_expiry() -> u64 {
    3600 // 1 hour
}

fn default_recovery_token_expiry() -> u64 {
    3600
}

/// SMTP configuration for transactional email.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// Sender address.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Base URL of the web client; links in emails point here.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            frontend_url: default_frontend_url(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    1025
}

fn default_from_email() -> String {
    "no-reply@smartbudget.local".to_string()
}

fn default_from_name() -> String {
    "Smart Budget".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

/// Presentation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// IANA timezone used to render timestamps in responses.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SMARTBUDGET").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("SMARTBUDGET__DATABASE__URL", Some("sqlite::memory:")),
                ("SMARTBUDGET__JWT__SECRET", Some("env-secret")),
                ("SMARTBUDGET__SERVER__PORT", Some("4000")),
                ("SMARTBUDGET__APP__TIMEZONE", Some("UTC")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "sqlite::memory:");
                assert_eq!(config.jwt.secret, "env-secret");
                assert_eq!(config.server.port, 4000);
                assert_eq!(config.app.timezone, "UTC");
            },
        );
    }

    #[test]
    fn test_defaults_fill_optional_sections() {
        temp_env::with_vars(
            [
                ("SMARTBUDGET__DATABASE__URL", Some("sqlite::memory:")),
                ("SMARTBUDGET__JWT__SECRET", Some("env-secret")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.server.request_timeout_secs, 30);
                assert!(!config.server.run_migrations);
                assert_eq!(config.jwt.email_token_expiry_secs, 3600);
                assert_eq!(config.email.smtp_port, 1025);
                assert_eq!(config.app.timezone, "America/Sao_Paulo");
            },
        );
    }

    #[test]
    fn test_missing_jwt_secret_fails() {
        temp_env::with_vars(
            [
                ("SMARTBUDGET__DATABASE__URL", Some("sqlite::memory:")),
                ("SMARTBUDGET__JWT__SECRET", None),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
