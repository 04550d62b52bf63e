//! Razorpay-specific request and response types.
//!
//! These mirror the JSON of the Razorpay REST API v1 closely enough to
//! parse real responses, then convert into the gateway port types.

use serde::{Deserialize, Serialize};

use crate::domain::payment::OrderRequest;
use crate::ports::{GatewayError, GatewayErrorCode, GatewayOrder, GatewayPayment};

// ════════════════════════════════════════════════════════════════════════════════
// Orders
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /v1/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RazorpayOrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    /// `1` captures automatically once the buyer authorizes.
    pub payment_capture: u8,
}

impl From<&OrderRequest> for RazorpayOrderRequest {
    fn from(request: &OrderRequest) -> Self {
        Self {
            amount: request.amount,
            currency: request.currency.clone(),
            receipt: request.receipt.clone(),
            payment_capture: u8::from(request.capture_on_authorization),
        }
    }
}

/// Order object returned by the orders API.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    pub status: String,
}

impl RazorpayOrder {
    /// Converts to the port type, keeping the full response alongside.
    pub fn into_gateway_order(self, raw: serde_json::Value) -> GatewayOrder {
        GatewayOrder {
            id: self.id,
            amount: self.amount,
            currency: self.currency,
            receipt: self.receipt,
            status: self.status,
            raw,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Payments
// ════════════════════════════════════════════════════════════════════════════════

/// Payment object returned by `GET /v1/payments/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayPayment {
    pub id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

impl From<RazorpayPayment> for GatewayPayment {
    fn from(payment: RazorpayPayment) -> Self {
        GatewayPayment {
            id: payment.id,
            order_id: payment.order_id,
            amount: payment.amount,
            currency: payment.currency,
            status: payment.status,
            method: payment.method,
            email: payment.email,
            contact: payment.contact,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════════

/// Error envelope: `{"error": {"code": "...", "description": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayErrorEnvelope {
    pub error: RazorpayErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Maps a non-success HTTP response to a gateway error.
pub fn error_from_response(status: u16, body: &str) -> GatewayError {
    let parsed = serde_json::from_str::<RazorpayErrorEnvelope>(body).ok();
    let description = parsed
        .as_ref()
        .and_then(|e| e.error.description.clone())
        .unwrap_or_else(|| format!("Razorpay returned HTTP {}", status));

    let code = match status {
        400 => GatewayErrorCode::InvalidRequest,
        401 => GatewayErrorCode::AuthenticationError,
        404 => GatewayErrorCode::NotFound,
        429 => GatewayErrorCode::RateLimitExceeded,
        _ => GatewayErrorCode::ProviderError,
    };

    let error = GatewayError::new(code, description);
    match parsed.and_then(|e| e.error.code) {
        Some(provider_code) => error.with_provider_code(provider_code),
        None => error,
    }
}
