//! Razorpay payment gateway adapter.
//!
//! Implements the `PaymentGateway` trait against the Razorpay REST API v1.
//! Requests authenticate with HTTP basic auth (`key_id:key_secret`).
//!
//! # Configuration
//!
//! ```ignore
//! let config = RazorpayConfig::new(key_id, key_secret);
//! let adapter = RazorpayPaymentAdapter::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::payment::OrderRequest;
use crate::ports::{GatewayError, GatewayOrder, GatewayPayment, PaymentGateway};

use super::gateway_types::{error_from_response, RazorpayOrder, RazorpayOrderRequest, RazorpayPayment};

/// Default Razorpay API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.razorpay.com";

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Public key id (rzp_test_... or rzp_live_...).
    key_id: String,

    /// Key secret, also used to sign checkout callbacks.
    key_secret: SecretString,

    /// Base URL for the API (default: https://api.razorpay.com).
    api_base_url: String,
}

impl RazorpayConfig {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: SecretString::new(key_secret.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

impl std::fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Razorpay payment gateway adapter.
pub struct RazorpayPaymentAdapter {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

impl RazorpayPaymentAdapter {
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    /// Reads a response body, turning non-2xx statuses into gateway errors.
    async fn read_body(
        &self,
        response: reqwest::Response,
        operation: &str,
    ) -> Result<String, GatewayError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        if !status.is_success() {
            let error = error_from_response(status.as_u16(), &body);
            tracing::error!(
                operation,
                status = status.as_u16(),
                code = %error.code,
                error = %error.message,
                "Razorpay request failed"
            );
            return Err(error);
        }

        Ok(body)
    }
}

#[async_trait]
impl PaymentGateway for RazorpayPaymentAdapter {
    async fn create_order(&self, request: OrderRequest) -> Result<GatewayOrder, GatewayError> {
        let body = RazorpayOrderRequest::from(&request);

        let response = self
            .http_client
            .post(self.url("/v1/orders"))
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        let text = self.read_body(response, "create_order").await?;

        let raw: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            GatewayError::provider(format!("Failed to parse Razorpay response: {}", e))
        })?;
        let order: RazorpayOrder = serde_json::from_value(raw.clone()).map_err(|e| {
            GatewayError::provider(format!("Unexpected Razorpay order shape: {}", e))
        })?;

        tracing::debug!(order_id = %order.id, amount = order.amount, "Razorpay order created");
        Ok(order.into_gateway_order(raw))
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError> {
        let response = self
            .http_client
            .get(self.url(&format!("/v1/payments/{}", payment_id)))
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose_secret()))
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        let text = self.read_body(response, "fetch_payment").await?;

        let payment: RazorpayPayment = serde_json::from_str(&text).map_err(|e| {
            GatewayError::provider(format!("Failed to parse Razorpay payment: {}", e))
        })?;

        Ok(payment.into())
    }
}
