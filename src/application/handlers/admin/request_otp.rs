//! RequestOtpHandler - First admin login step: password check and code delivery.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::admin::{generate_otp_code, AdminAccessPolicy, AdminAuthError, OtpChallenge};
use crate::domain::foundation::Timestamp;
use crate::ports::{OtpSender, OtpStore};

/// Command to start an admin login.
#[derive(Debug, Clone)]
pub struct RequestOtpCommand {
    pub email: String,
    pub password: String,
}

/// Result of a successful first step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOtpResult {
    /// Normalized email the code was sent to.
    pub email: String,
    pub expires_at: Timestamp,
}

/// Settings for issued codes.
#[derive(Debug, Clone, Copy)]
pub struct OtpSettings {
    pub ttl_secs: u64,
    pub max_attempts: u32,
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            max_attempts: 5,
        }
    }
}

/// Handler for the password step of admin login.
pub struct RequestOtpHandler {
    policy: AdminAccessPolicy,
    store: Arc<dyn OtpStore>,
    sender: Arc<dyn OtpSender>,
    settings: OtpSettings,
}

impl RequestOtpHandler {
    pub fn new(
        policy: AdminAccessPolicy,
        store: Arc<dyn OtpStore>,
        sender: Arc<dyn OtpSender>,
        settings: OtpSettings,
    ) -> Self {
        Self {
            policy,
            store,
            sender,
            settings,
        }
    }

    pub async fn handle(&self, cmd: RequestOtpCommand) -> Result<RequestOtpResult, AdminAuthError> {
        // 1. Check credentials
        let email = self
            .policy
            .authenticate(&cmd.email, &cmd.password)
            .map_err(|e| {
                warn!(email = %cmd.email, error = %e, "Admin login rejected");
                e
            })?;

        // 2. Issue and store a fresh code, replacing any pending one
        let challenge = OtpChallenge::issue(
            email.clone(),
            generate_otp_code(),
            Timestamp::now(),
            self.settings.ttl_secs,
            self.settings.max_attempts,
        );
        let expires_at = challenge.expires_at;
        let code = challenge.code().to_string();

        self.store
            .put(challenge)
            .await
            .map_err(|e| AdminAuthError::unavailable(e.to_string()))?;

        // 3. Deliver it
        if let Err(e) = self.sender.send(&email, &code).await {
            warn!(email = %email, error = %e, "OTP delivery failed");
            // A code nobody received must not stay valid
            let _ = self.store.remove(&email).await;
            return Err(e);
        }

        info!(email = %email, "Admin OTP issued");
        Ok(RequestOtpResult { email, expires_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::email::MockOtpSender;
    use crate::adapters::storage::InMemoryOtpStore;

    struct Fixture {
        store: InMemoryOtpStore,
        sender: MockOtpSender,
        handler: RequestOtpHandler,
    }

    fn fixture() -> Fixture {
        let store = InMemoryOtpStore::new();
        let sender = MockOtpSender::new();
        let handler = RequestOtpHandler::new(
            AdminAccessPolicy::new(["owner@peche.shop"], "hunter22"),
            Arc::new(store.clone()),
            Arc::new(sender.clone()),
            OtpSettings::default(),
        );
        Fixture {
            store,
            sender,
            handler,
        }
    }

    fn command(email: &str, password: &str) -> RequestOtpCommand {
        RequestOtpCommand {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn valid_credentials_send_stored_code() {
        let f = fixture();

        let result = f
            .handler
            .handle(command("Owner@Peche.shop", "hunter22"))
            .await
            .unwrap();

        assert_eq!(result.email, "owner@peche.shop");
        let sent = f.sender.last_code_for("owner@peche.shop").unwrap();
        let stored = f.store.pending("owner@peche.shop").await.unwrap();
        assert_eq!(stored.code(), sent);
        assert_eq!(stored.max_attempts, 5);
    }

    #[tokio::test]
    async fn bad_password_sends_nothing() {
        let f = fixture();

        let err = f
            .handler
            .handle(command("owner@peche.shop", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err, AdminAuthError::InvalidCredentials);
        assert_eq!(f.sender.sent_count(), 0);
        assert_eq!(f.store.pending_count().await, 0);
    }

    #[tokio::test]
    async fn second_login_replaces_pending_code() {
        let f = fixture();

        f.handler
            .handle(command("owner@peche.shop", "hunter22"))
            .await
            .unwrap();
        f.handler
            .handle(command("owner@peche.shop", "hunter22"))
            .await
            .unwrap();

        let latest = f.sender.last_code_for("owner@peche.shop").unwrap();
        let stored = f.store.pending("owner@peche.shop").await.unwrap();
        assert_eq!(stored.code(), latest);
        assert_eq!(f.store.pending_count().await, 1);
    }

    #[tokio::test]
    async fn delivery_failure_discards_code() {
        let f = fixture();
        f.sender
            .set_error(AdminAuthError::delivery_failed("resend unavailable"));

        let err = f
            .handler
            .handle(command("owner@peche.shop", "hunter22"))
            .await
            .unwrap_err();

        assert!(matches!(err, AdminAuthError::DeliveryFailed(_)));
        assert_eq!(f.store.pending_count().await, 0);
    }
}
