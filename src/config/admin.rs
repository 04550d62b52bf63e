//! Admin dashboard authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Admin login configuration: allow-list, shared password, OTP and JWT settings
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Emails allowed to log in (comma-separated)
    pub allowed_emails: String,

    /// Shared admin password (first login factor)
    pub password: SecretString,

    /// HS256 signing secret for bearer tokens
    pub jwt_secret: SecretString,

    /// One-time code lifetime in seconds
    #[serde(default = "default_otp_ttl")]
    pub otp_ttl_secs: u64,

    /// Wrong guesses allowed per code
    #[serde(default = "default_otp_max_attempts")]
    pub otp_max_attempts: u32,

    /// Bearer token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

impl AdminConfig {
    /// Get allowed emails as a vector
    pub fn allowed_emails_list(&self) -> Vec<String> {
        self.allowed_emails
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn otp_ttl(&self) -> Duration {
        Duration::from_secs(self.otp_ttl_secs)
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Validate admin configuration
    ///
    /// Production additionally requires a JWT secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let emails = self.allowed_emails_list();
        if emails.is_empty() {
            return Err(ValidationError::MissingRequired("ADMIN__ALLOWED_EMAILS"));
        }
        if let Some(bad) = emails.iter().find(|e| !e.contains('@')) {
            return Err(ValidationError::InvalidAdminEmail(bad.clone()));
        }
        if self.password.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("ADMIN__PASSWORD"));
        }

        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("ADMIN__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < 32 {
            return Err(ValidationError::WeakJwtSecret);
        }

        if self.otp_ttl_secs == 0 || self.otp_max_attempts == 0 || self.token_ttl_secs == 0 {
            return Err(ValidationError::InvalidOtpSettings);
        }

        Ok(())
    }
}

fn default_otp_ttl() -> u64 {
    300
}

fn default_otp_max_attempts() -> u32 {
    5
}

fn default_token_ttl() -> u64 {
    24 * 60 * 60
}
