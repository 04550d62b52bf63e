//! Load and validation failures for [`super::AppConfig`].

use thiserror::Error;

/// Raised while reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A value that parsed but cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid listen address {0}")]
    InvalidListenAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Invalid Razorpay key id format")]
    InvalidRazorpayKey,

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Invalid API base URL: {0}")]
    InvalidApiBaseUrl(String),

    #[error("Invalid admin email address: {0}")]
    InvalidAdminEmail(String),

    #[error("JWT secret must be at least 32 bytes in production")]
    WeakJwtSecret,

    #[error("OTP and token lifetimes and the OTP attempt limit must be positive")]
    InvalidOtpSettings,

    #[error("Invalid Resend API key format")]
    InvalidResendKey,

    #[error("Invalid from email address")]
    InvalidFromEmail,

    #[error("Email delivery must be configured in production")]
    EmailRequiredInProduction,
}
