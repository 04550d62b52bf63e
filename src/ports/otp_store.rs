//! OtpStore port - pending one-time codes keyed by admin email.

use async_trait::async_trait;

use crate::domain::admin::{AdminAuthError, OtpChallenge};
use crate::domain::foundation::{DomainError, Timestamp};

/// Holds at most one pending challenge per email.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Stores a challenge, replacing any previous one for the same email.
    async fn put(&self, challenge: OtpChallenge) -> Result<(), DomainError>;

    /// Checks one guess against the pending challenge for `email`.
    ///
    /// Reading the challenge, counting the attempt and discarding a used,
    /// expired or exhausted challenge happen as a single step, so parallel
    /// guesses cannot share an attempt. No pending challenge is
    /// [`AdminAuthError::InvalidOtp`].
    async fn attempt(
        &self,
        email: &str,
        candidate: &str,
        now: Timestamp,
    ) -> Result<(), AdminAuthError>;

    /// Removes the pending challenge for an email, if any.
    async fn remove(&self, email: &str) -> Result<(), DomainError>;
}
