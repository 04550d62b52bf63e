//! OtpSender port - delivers one-time codes to admins.

use async_trait::async_trait;

use crate::domain::admin::AdminAuthError;

/// Delivers a login code out of band.
#[async_trait]
pub trait OtpSender: Send + Sync {
    /// Sends `code` to `email`.
    ///
    /// Returns `AdminAuthError::DeliveryFailed` when the message could not
    /// be handed to the delivery service.
    async fn send(&self, email: &str, code: &str) -> Result<(), AdminAuthError>;
}
