//! OTP sender that writes codes to the log.
//!
//! For local development without an email provider. Configuration
//! validation refuses it in production.

use async_trait::async_trait;

use crate::domain::admin::AdminAuthError;
use crate::ports::OtpSender;

#[derive(Debug, Clone, Default)]
pub struct LogOtpSender;

impl LogOtpSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OtpSender for LogOtpSender {
    async fn send(&self, email: &str, code: &str) -> Result<(), AdminAuthError> {
        tracing::warn!(email, code, "No email provider configured, admin OTP logged");
        Ok(())
    }
}
