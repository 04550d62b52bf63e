//! Resend settings for delivering admin login codes.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Starts with `re_`.
    pub resend_api_key: SecretString,

    #[serde(default = "default_from_email")]
    pub from_email: String,

    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// `Name <address>` as Resend expects in the `from` field.
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let key = self.resend_api_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__RESEND_API_KEY"));
        }
        if !key.starts_with("re_") {
            return Err(ValidationError::InvalidResendKey);
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

fn default_from_email() -> String {
    "noreply@peche.in".to_string()
}

fn default_from_name() -> String {
    "Peche Admin".to_string()
}
