//! Mock OTP sender for testing.
//!
//! Records every code it is asked to deliver so tests can complete the
//! login flow, and supports error injection.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::admin::AdminAuthError;
use crate::ports::OtpSender;

#[derive(Default)]
struct MockState {
    sent: Vec<(String, String)>,
    next_error: Option<AdminAuthError>,
}

/// Captures codes instead of sending them.
#[derive(Clone, Default)]
pub struct MockOtpSender {
    inner: Arc<Mutex<MockState>>,
}

impl MockOtpSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next send with this error.
    pub fn set_error(&self, error: AdminAuthError) {
        self.state().next_error = Some(error);
    }

    /// The most recent code sent to `email`.
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.state()
            .sent
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.state().sent.len()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl OtpSender for MockOtpSender {
    async fn send(&self, email: &str, code: &str) -> Result<(), AdminAuthError> {
        let mut state = self.state();
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        state.sent.push((email.to_string(), code.to_string()));
        Ok(())
    }
}
