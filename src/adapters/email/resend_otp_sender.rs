//! Resend email adapter for admin login codes.
//!
//! Sends a short plain-text and HTML email through the Resend REST API
//! (`POST /emails`, bearer-token auth).

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::admin::AdminAuthError;
use crate::ports::OtpSender;

/// Default Resend API host.
pub const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";

/// Resend API configuration.
#[derive(Clone)]
pub struct ResendConfig {
    api_key: SecretString,
    from_address: String,
    api_base_url: String,
    /// Code validity shown in the email body.
    ttl_minutes: u64,
}

impl ResendConfig {
    pub fn new(api_key: impl Into<String>, from_address: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            from_address: from_address.into(),
            api_base_url: DEFAULT_RESEND_BASE_URL.to_string(),
            ttl_minutes: 5,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.ttl_minutes = (ttl_secs / 60).max(1);
        self
    }
}

impl std::fmt::Debug for ResendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendConfig")
            .field("api_key", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: String,
    html: String,
}

/// Delivers admin OTP codes by email.
pub struct ResendOtpSender {
    config: ResendConfig,
    http_client: reqwest::Client,
}

impl ResendOtpSender {
    pub fn new(config: ResendConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn build_request<'a>(&'a self, email: &'a str, code: &str) -> SendEmailRequest<'a> {
        let minutes = self.config.ttl_minutes;
        SendEmailRequest {
            from: &self.config.from_address,
            to: [email],
            subject: "Your admin login code",
            text: format!(
                "Your admin login code is {}. It expires in {} minutes.",
                code, minutes
            ),
            html: format!(
                "<p>Your admin login code is</p><h2 style=\"letter-spacing:4px\">{}</h2>\
                 <p>It expires in {} minutes. If you did not try to log in, ignore this email.</p>",
                code, minutes
            ),
        }
    }
}

#[async_trait]
impl OtpSender for ResendOtpSender {
    async fn send(&self, email: &str, code: &str) -> Result<(), AdminAuthError> {
        let url = format!("{}/emails", self.config.api_base_url);
        let body = self.build_request(email, code);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AdminAuthError::delivery_failed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status, error = %error_text, "Resend email request failed");
            return Err(AdminAuthError::delivery_failed(format!(
                "Resend returned HTTP {}",
                status
            )));
        }

        tracing::debug!(email, "Admin OTP email sent");
        Ok(())
    }
}
