//! In-Memory OTP Store Adapter
//!
//! Pending admin login codes, one per email. Codes do not survive a
//! restart, which only forces the admin to log in again.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::admin::{AdminAuthError, OtpChallenge};
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::OtpStore;

/// In-memory storage for pending OTP challenges
#[derive(Debug, Clone, Default)]
pub struct InMemoryOtpStore {
    challenges: Arc<RwLock<HashMap<String, OtpChallenge>>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pending challenges
    pub async fn pending_count(&self) -> usize {
        self.challenges.read().await.len()
    }

    /// The pending challenge for an email, if any.
    pub async fn pending(&self, email: &str) -> Option<OtpChallenge> {
        self.challenges.read().await.get(email).cloned()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, challenge: OtpChallenge) -> Result<(), DomainError> {
        let mut challenges = self.challenges.write().await;
        challenges.insert(challenge.email.clone(), challenge);
        Ok(())
    }

    async fn attempt(
        &self,
        email: &str,
        candidate: &str,
        now: Timestamp,
    ) -> Result<(), AdminAuthError> {
        // Check, count and discard under one write lock
        let mut challenges = self.challenges.write().await;
        let Some(challenge) = challenges.get_mut(email) else {
            return Err(AdminAuthError::InvalidOtp);
        };

        let outcome = challenge.verify(candidate, now);
        let keep = outcome == Err(AdminAuthError::InvalidOtp) && !challenge.is_exhausted();
        if !keep {
            challenges.remove(email);
        }
        outcome
    }

    async fn remove(&self, email: &str) -> Result<(), DomainError> {
        self.challenges.write().await.remove(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "owner@peche.shop";

    fn challenge(code: &str) -> OtpChallenge {
        OtpChallenge::issue(EMAIL, code, Timestamp::now(), 300, 5)
    }

    #[tokio::test]
    async fn put_replaces_previous_code() {
        let store = InMemoryOtpStore::new();
        store.put(challenge("111111")).await.unwrap();
        store.put(challenge("222222")).await.unwrap();

        let stored = store.pending(EMAIL).await.unwrap();

        assert_eq!(stored.code(), "222222");
        assert_eq!(store.pending_count().await, 1);
    }

    #[tokio::test]
    async fn remove_deletes_challenge() {
        let store = InMemoryOtpStore::new();
        store.put(challenge("111111")).await.unwrap();

        store.remove(EMAIL).await.unwrap();

        assert!(store.pending(EMAIL).await.is_none());
    }

    #[tokio::test]
    async fn correct_guess_consumes_challenge() {
        let store = InMemoryOtpStore::new();
        store.put(challenge("111111")).await.unwrap();

        assert_eq!(store.attempt(EMAIL, "111111", Timestamp::now()).await, Ok(()));
        assert_eq!(
            store.attempt(EMAIL, "111111", Timestamp::now()).await,
            Err(AdminAuthError::InvalidOtp)
        );
        assert_eq!(store.pending_count().await, 0);
    }

    #[tokio::test]
    async fn wrong_guess_is_counted_in_place() {
        let store = InMemoryOtpStore::new();
        store.put(challenge("111111")).await.unwrap();

        let result = store.attempt(EMAIL, "999999", Timestamp::now()).await;

        assert_eq!(result, Err(AdminAuthError::InvalidOtp));
        assert_eq!(store.pending(EMAIL).await.unwrap().attempts, 1);
    }

    #[tokio::test]
    async fn unknown_email_is_invalid() {
        let store = InMemoryOtpStore::new();

        let result = store.attempt(EMAIL, "111111", Timestamp::now()).await;

        assert_eq!(result, Err(AdminAuthError::InvalidOtp));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn parallel_wrong_guesses_share_the_attempt_limit() {
        for _ in 0..20 {
            let store = InMemoryOtpStore::new();
            store.put(challenge("111111")).await.unwrap();

            let guesses: Vec<_> = (0..64)
                .map(|i| {
                    let store = store.clone();
                    tokio::spawn(async move {
                        let guess = format!("{:06}", 200_000 + i);
                        store.attempt(EMAIL, &guess, Timestamp::now()).await
                    })
                })
                .collect();
            for guess in guesses {
                assert!(guess.await.unwrap().is_err());
            }

            // Five wrong guesses exhaust the code, however they interleave
            assert_eq!(store.pending_count().await, 0);
            assert_eq!(
                store.attempt(EMAIL, "111111", Timestamp::now()).await,
                Err(AdminAuthError::InvalidOtp)
            );
        }
    }
}
