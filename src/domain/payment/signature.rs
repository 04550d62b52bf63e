//! HMAC-SHA256 verification of checkout widget callbacks.
//!
//! After a buyer pays, the widget hands the client an order id, a payment id
//! and a signature. The gateway computes that signature as
//! `hex(HMAC-SHA256(key_secret, "{order_id}|{payment_id}"))`; recomputing it
//! with our copy of the secret proves the pair was not forged by the client.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifies gateway payment signatures with the shared key secret.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: SecretString,
}

impl SignatureVerifier {
    /// Creates a verifier for the given key secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    /// Computes the lowercase hex signature expected for this order/payment pair.
    pub fn expected_signature(&self, order_id: &str, payment_id: &str) -> String {
        // HMAC accepts keys of any length, so keying cannot fail.
        match HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes()) {
            Ok(mut mac) => {
                mac.update(order_id.as_bytes());
                mac.update(b"|");
                mac.update(payment_id.as_bytes());
                hex::encode(mac.finalize().into_bytes())
            }
            Err(_) => String::new(),
        }
    }

    /// Returns true when `supplied` matches the expected signature byte for byte.
    ///
    /// Comparison is constant-time. An empty signature never verifies.
    pub fn verify(&self, order_id: &str, payment_id: &str, supplied: &str) -> bool {
        if supplied.is_empty() {
            return false;
        }
        let expected = self.expected_signature(order_id, payment_id);
        if expected.is_empty() {
            return false;
        }
        expected.as_bytes().ct_eq(supplied.as_bytes()).into()
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
