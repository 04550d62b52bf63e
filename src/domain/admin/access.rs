//! Who may log in to the admin dashboard.

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use super::errors::AdminAuthError;

/// Allow-listed emails sharing one admin password.
#[derive(Clone)]
pub struct AdminAccessPolicy {
    allowed_emails: Vec<String>,
    password: SecretString,
}

impl AdminAccessPolicy {
    /// Emails are compared case-insensitively and stored lowercased.
    pub fn new<I, S>(allowed_emails: I, password: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_emails: allowed_emails
                .into_iter()
                .map(|e| normalize_email(e.as_ref()))
                .filter(|e| !e.is_empty())
                .collect(),
            password: SecretString::new(password.into()),
        }
    }

    pub fn is_allowed(&self, email: &str) -> bool {
        let email = normalize_email(email);
        self.allowed_emails.iter().any(|allowed| *allowed == email)
    }

    /// Checks an email/password pair, returning the normalized email.
    ///
    /// The password comparison runs even for unknown emails.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<String, AdminAuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AdminAuthError::MissingCredentials);
        }

        let password_ok: bool = self
            .password
            .expose_secret()
            .as_bytes()
            .ct_eq(password.as_bytes())
            .into();

        if password_ok && self.is_allowed(email) {
            Ok(normalize_email(email))
        } else {
            Err(AdminAuthError::InvalidCredentials)
        }
    }
}

impl std::fmt::Debug for AdminAccessPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccessPolicy")
            .field("allowed_emails", &self.allowed_emails)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Lowercased, trimmed form used as the OTP store key and token subject.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
