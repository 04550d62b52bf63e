//! Admin session ports for issuing and validating bearer tokens.
//!
//! # Contract
//!
//! Validators must check the token signature and expiry, returning
//! `AdminAuthError::InvalidToken` for anything malformed, forged or
//! expired. The JWT adapter implements both traits with one secret.

use async_trait::async_trait;

use crate::domain::admin::{AdminAuthError, AdminIdentity};

/// Issues bearer tokens after a successful OTP check.
pub trait AdminTokenIssuer: Send + Sync {
    /// Returns a signed token whose subject is `email`.
    fn issue(&self, email: &str) -> Result<String, AdminAuthError>;
}

/// Validates bearer tokens on admin routes.
#[async_trait]
pub trait AdminSessionValidator: Send + Sync {
    /// Validates a raw token (without the `Bearer ` prefix).
    async fn validate(&self, token: &str) -> Result<AdminIdentity, AdminAuthError>;
}
