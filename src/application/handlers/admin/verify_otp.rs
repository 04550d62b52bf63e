//! VerifyOtpHandler - Second admin login step: code check and token issue.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::admin::{normalize_email, AdminAuthError};
use crate::domain::foundation::Timestamp;
use crate::ports::{AdminTokenIssuer, OtpStore};

/// Command to complete an admin login.
#[derive(Debug, Clone)]
pub struct VerifyOtpCommand {
    pub email: String,
    pub otp: String,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOtpResult {
    pub email: String,
    /// Bearer token for the admin routes.
    pub token: String,
}

/// Handler for the code step of admin login.
pub struct VerifyOtpHandler {
    store: Arc<dyn OtpStore>,
    issuer: Arc<dyn AdminTokenIssuer>,
}

impl VerifyOtpHandler {
    pub fn new(store: Arc<dyn OtpStore>, issuer: Arc<dyn AdminTokenIssuer>) -> Self {
        Self { store, issuer }
    }

    pub async fn handle(&self, cmd: VerifyOtpCommand) -> Result<VerifyOtpResult, AdminAuthError> {
        let email = normalize_email(&cmd.email);
        if email.is_empty() || cmd.otp.trim().is_empty() {
            return Err(AdminAuthError::InvalidOtp);
        }

        if let Err(e) = self.store.attempt(&email, &cmd.otp, Timestamp::now()).await {
            warn!(email = %email, error = ?e, "Admin OTP rejected");
            return Err(e);
        }

        let token = self.issuer.issue(&email)?;
        info!(email = %email, "Admin logged in");
        Ok(VerifyOtpResult { email, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::JwtAdminSessions;
    use crate::adapters::storage::InMemoryOtpStore;
    use crate::domain::admin::OtpChallenge;
    use crate::ports::AdminSessionValidator;

    struct Fixture {
        store: InMemoryOtpStore,
        sessions: Arc<JwtAdminSessions>,
        handler: Arc<VerifyOtpHandler>,
    }

    fn fixture() -> Fixture {
        let store = InMemoryOtpStore::new();
        let sessions = Arc::new(JwtAdminSessions::new("test-jwt-secret", 3600));
        let handler = VerifyOtpHandler::new(Arc::new(store.clone()), sessions.clone());
        Fixture {
            store,
            sessions,
            handler: Arc::new(handler),
        }
    }

    async fn pending(store: &InMemoryOtpStore, code: &str, issued_at: Timestamp) {
        store
            .put(OtpChallenge::issue("owner@peche.shop", code, issued_at, 300, 5))
            .await
            .unwrap();
    }

    fn command(otp: &str) -> VerifyOtpCommand {
        VerifyOtpCommand {
            email: "owner@peche.shop".to_string(),
            otp: otp.to_string(),
        }
    }

    #[tokio::test]
    async fn correct_code_returns_valid_token_and_consumes_code() {
        let f = fixture();
        pending(&f.store, "123456", Timestamp::now()).await;

        let result = f.handler.handle(command("123456")).await.unwrap();

        let admin = f.sessions.validate(&result.token).await.unwrap();
        assert_eq!(admin.email, "owner@peche.shop");
        assert_eq!(f.store.pending_count().await, 0);

        let replay = f.handler.handle(command("123456")).await.unwrap_err();
        assert_eq!(replay, AdminAuthError::InvalidOtp);
    }

    #[tokio::test]
    async fn email_is_matched_case_insensitively() {
        let f = fixture();
        pending(&f.store, "123456", Timestamp::now()).await;

        let result = f
            .handler
            .handle(VerifyOtpCommand {
                email: " OWNER@peche.shop ".to_string(),
                otp: "123456".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn wrong_code_keeps_challenge_with_attempt_counted() {
        let f = fixture();
        pending(&f.store, "123456", Timestamp::now()).await;

        let err = f.handler.handle(command("000000")).await.unwrap_err();

        assert_eq!(err, AdminAuthError::InvalidOtp);
        let stored = f.store.pending("owner@peche.shop").await.unwrap();
        assert_eq!(stored.attempts, 1);
    }

    #[tokio::test]
    async fn fifth_wrong_code_discards_challenge() {
        let f = fixture();
        pending(&f.store, "123456", Timestamp::now()).await;

        for _ in 0..5 {
            let _ = f.handler.handle(command("000000")).await;
        }

        assert_eq!(f.store.pending_count().await, 0);
        let err = f.handler.handle(command("123456")).await.unwrap_err();
        assert_eq!(err, AdminAuthError::InvalidOtp);
    }

    #[tokio::test]
    async fn expired_code_is_rejected_and_discarded() {
        let f = fixture();
        let issued = Timestamp::from_unix_secs(Timestamp::now().as_unix_secs() - 600);
        pending(&f.store, "123456", issued).await;

        let err = f.handler.handle(command("123456")).await.unwrap_err();

        assert_eq!(err, AdminAuthError::OtpExpired);
        assert_eq!(f.store.pending_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_email_is_invalid() {
        let f = fixture();

        let err = f.handler.handle(command("123456")).await.unwrap_err();

        assert_eq!(err, AdminAuthError::InvalidOtp);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_wrong_codes_cannot_outrun_attempt_limit() {
        let f = fixture();
        pending(&f.store, "123456", Timestamp::now()).await;

        let guesses: Vec<_> = (0..64)
            .map(|i| {
                let handler = Arc::clone(&f.handler);
                tokio::spawn(async move { handler.handle(command(&format!("{:06}", 500_000 + i))).await })
            })
            .collect();
        for guess in guesses {
            assert!(guess.await.unwrap().is_err());
        }

        let err = f.handler.handle(command("123456")).await.unwrap_err();
        assert_eq!(err, AdminAuthError::InvalidOtp);
        assert_eq!(f.store.pending_count().await, 0);
    }
}
