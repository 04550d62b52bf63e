//! One-time passcodes for the second admin login factor.

use rand::Rng;
use subtle::ConstantTimeEq;

use crate::domain::foundation::Timestamp;

use super::errors::AdminAuthError;

/// Digits in a generated code.
pub const OTP_LENGTH: usize = 6;

/// Generates a zero-padded numeric code, e.g. `"042913"`.
pub fn generate_otp_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:0width$}", n, width = OTP_LENGTH)
}

/// A pending code issued to one admin email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    pub email: String,
    code: String,
    pub expires_at: Timestamp,
    pub attempts: u32,
    pub max_attempts: u32,
}

impl OtpChallenge {
    pub fn issue(
        email: impl Into<String>,
        code: impl Into<String>,
        now: Timestamp,
        ttl_secs: u64,
        max_attempts: u32,
    ) -> Self {
        Self {
            email: email.into(),
            code: code.into(),
            expires_at: now.plus_secs(ttl_secs),
            attempts: 0,
            max_attempts,
        }
    }

    /// The code to deliver to the admin.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        !now.is_before(&self.expires_at)
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Checks a guess, counting it against the attempt limit.
    ///
    /// Callers must discard the challenge once this returns `Ok` or
    /// [`AdminAuthError::OtpExpired`] / [`AdminAuthError::TooManyAttempts`].
    pub fn verify(&mut self, candidate: &str, now: Timestamp) -> Result<(), AdminAuthError> {
        if self.is_expired(now) {
            return Err(AdminAuthError::OtpExpired);
        }
        if self.is_exhausted() {
            return Err(AdminAuthError::TooManyAttempts);
        }

        self.attempts += 1;
        let matches: bool = self.code.as_bytes().ct_eq(candidate.trim().as_bytes()).into();
        if matches {
            Ok(())
        } else {
            Err(AdminAuthError::InvalidOtp)
        }
    }
}
