//! The authenticated admin carried through request extensions.
//!
//! Populated by the `AdminSessionValidator` port after a bearer token is
//! validated, then read by admin handlers through the `RequireAdmin`
//! extractor.

/// An admin whose bearer token has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    /// Email address the token was issued to.
    pub email: String,
}

impl AdminIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_email() {
        let admin = AdminIdentity::new("owner@peche.shop");
        assert_eq!(admin.email, "owner@peche.shop");
    }
}
