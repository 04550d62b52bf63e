//! Admin authentication errors.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Failures along the admin login, OTP and bearer-token paths.
///
/// The OTP variants share one message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminAuthError {
    /// Email not on the allow-list or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email or password missing from the request.
    #[error("Email and password are required")]
    MissingCredentials,

    /// No pending code, or the code did not match.
    #[error("Invalid or expired OTP")]
    InvalidOtp,

    /// The pending code outlived its time to live.
    #[error("Invalid or expired OTP")]
    OtpExpired,

    /// Too many wrong guesses against the pending code.
    #[error("Invalid or expired OTP")]
    TooManyAttempts,

    /// Bearer token absent from the request.
    #[error("Authentication required")]
    MissingToken,

    /// Bearer token malformed, forged or expired.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The one-time code could not be delivered.
    #[error("Failed to send OTP: {0}")]
    DeliveryFailed(String),

    /// Storage or signing failure.
    #[error("Admin service unavailable: {0}")]
    Unavailable(String),
}

impl AdminAuthError {
    pub fn delivery_failed(message: impl Into<String>) -> Self {
        Self::DeliveryFailed(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AdminAuthError::MissingCredentials => ErrorCode::ValidationFailed,
            AdminAuthError::DeliveryFailed(_) | AdminAuthError::Unavailable(_) => {
                ErrorCode::InternalError
            }
            _ => ErrorCode::Unauthorized,
        }
    }

    /// Message safe to show the dashboard.
    pub fn message(&self) -> String {
        match self {
            AdminAuthError::DeliveryFailed(_) => "Failed to send OTP".to_string(),
            AdminAuthError::Unavailable(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// True when the dashboard should send the admin back to the login form.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AdminAuthError::MissingToken | AdminAuthError::InvalidToken
        )
    }
}
