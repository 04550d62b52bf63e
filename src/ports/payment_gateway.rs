//! Payment gateway port for order creation and payment lookup.
//!
//! The checkout handlers talk to the gateway only through this trait. The
//! Razorpay adapter implements it over HTTPS; tests use the mock gateway.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::payment::OrderRequest;

/// Port for the hosted payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens a gateway order the checkout widget can be launched against.
    async fn create_order(&self, request: OrderRequest) -> Result<GatewayOrder, GatewayError>;

    /// Fetches a payment by its gateway id.
    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError>;
}

/// An order as issued by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayOrder {
    /// Gateway order id (`order_...`).
    pub id: String,

    /// Amount in minor units.
    pub amount: i64,

    pub currency: String,

    pub receipt: Option<String>,

    /// Gateway order status, e.g. `created`.
    pub status: String,

    /// The full gateway response, returned to the checkout client as-is.
    pub raw: serde_json::Value,
}

/// A payment as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayPayment {
    /// Gateway payment id (`pay_...`).
    pub id: String,

    pub order_id: Option<String>,

    /// Amount in minor units.
    pub amount: i64,

    pub currency: String,

    /// Gateway payment status, e.g. `captured`.
    pub status: String,

    /// Payment method, e.g. `card` or `upi`.
    pub method: Option<String>,

    pub email: Option<String>,

    /// Buyer phone number.
    pub contact: Option<String>,
}

/// Errors from gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayError {
    /// Error code for categorization.
    pub code: GatewayErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Gateway's own error code (if available).
    pub provider_code: Option<String>,
}

impl GatewayError {
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::NetworkError, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::AuthenticationError, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::InvalidRequest, message)
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new(GatewayErrorCode::NotFound, format!("{} not found", resource))
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::ProviderError, message)
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for GatewayError {}

impl From<GatewayError> for DomainError {
    fn from(err: GatewayError) -> Self {
        DomainError::new(ErrorCode::GatewayError, err.message)
            .with_detail("gateway_code", err.code.to_string())
    }
}

/// Gateway error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayErrorCode {
    /// Network connectivity issue or timeout.
    NetworkError,

    /// API key rejected.
    AuthenticationError,

    /// Gateway rejected the request parameters.
    InvalidRequest,

    /// Order or payment does not exist.
    NotFound,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Gateway-side failure or unexpected response.
    ProviderError,
}

impl std::fmt::Display for GatewayErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GatewayErrorCode::NetworkError => "network_error",
            GatewayErrorCode::AuthenticationError => "authentication_error",
            GatewayErrorCode::InvalidRequest => "invalid_request",
            GatewayErrorCode::NotFound => "not_found",
            GatewayErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            GatewayErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}
