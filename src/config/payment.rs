//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::adapters::razorpay::DEFAULT_API_BASE_URL;
use crate::domain::payment::DEFAULT_CURRENCY;

use super::error::ValidationError;

/// Payment configuration (Razorpay)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Razorpay key id
    pub razorpay_key_id: String,

    /// Razorpay key secret, also the checkout signature key
    pub razorpay_key_secret: SecretString,

    /// ISO currency code for new orders
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Razorpay API host
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl PaymentConfig {
    /// Check if using Razorpay test mode
    pub fn is_test_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_test_")
    }

    /// Check if using Razorpay live mode
    pub fn is_live_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.razorpay_key_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__RAZORPAY_KEY_ID"));
        }
        if self.razorpay_key_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired(
                "PAYMENT__RAZORPAY_KEY_SECRET",
            ));
        }

        // Verify key prefix for safety
        if !self.razorpay_key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidRazorpayKey);
        }

        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidCurrency(self.currency.clone()));
        }

        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://")
        {
            return Err(ValidationError::InvalidApiBaseUrl(self.api_base_url.clone()));
        }

        Ok(())
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key_id: &str) -> PaymentConfig {
        PaymentConfig {
            razorpay_key_id: key_id.to_string(),
            razorpay_key_secret: SecretString::new("secret_xxx".to_string()),
            currency: default_currency(),
            api_base_url: default_api_base_url(),
        }
    }

    #[test]
    fn test_is_test_mode() {
        let config = config("rzp_test_abc");
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_is_live_mode() {
        let config = config("rzp_live_abc");
        assert!(config.is_live_mode());
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_defaults() {
        let config = config("rzp_test_abc");
        assert_eq!(config.currency, "INR");
        assert_eq!(config.api_base_url, "https://api.razorpay.com");
    }

    #[test]
    fn test_validation_missing_key_id() {
        assert!(matches!(
            config("").validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validation_missing_secret() {
        let mut config = config("rzp_test_abc");
        config.razorpay_key_secret = SecretString::new(String::new());
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("PAYMENT__RAZORPAY_KEY_SECRET"))
        );
    }

    #[test]
    fn test_validation_invalid_key_prefix() {
        assert_eq!(
            config("sk_test_abc").validate(),
            Err(ValidationError::InvalidRazorpayKey)
        );
    }

    #[test]
    fn test_validation_invalid_currency() {
        let mut config = config("rzp_test_abc");
        config.currency = "inr".to_string();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCurrency(_))
        ));
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let mut config = config("rzp_test_abc");
        config.api_base_url = "api.razorpay.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidApiBaseUrl(_))
        ));
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config("rzp_test_abc").validate().is_ok());
    }
}
