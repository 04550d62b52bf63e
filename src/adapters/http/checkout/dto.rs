//! HTTP DTOs (Data Transfer Objects) for checkout endpoints.
//!
//! Field names follow what the storefront widget and checkout client send:
//! Razorpay's snake_case callback fields next to camelCase buyer metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::handlers::checkout::{
    CreateOrderCommand, RecordPaymentFailureCommand, VerifyPaymentCommand,
};
use crate::domain::payment::BuyerDetails;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a gateway order.
///
/// The amount arrives as a JSON number or a numeric string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub amount: Value,
}

impl CreateOrderRequest {
    /// Raw amount text, or `None` when the client sent nothing usable.
    pub fn amount_text(&self) -> Option<String> {
        match &self.amount {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            other => Some(other.to_string()),
        }
    }

    pub fn into_command(self) -> CreateOrderCommand {
        CreateOrderCommand {
            amount: self.amount_text(),
        }
    }
}

/// Checkout success callback forwarded by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
    #[serde(default, rename = "productName")]
    pub product_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, rename = "originalUsdAmount")]
    pub original_usd_amount: Option<Value>,
    #[serde(default, rename = "exchangeRate")]
    pub exchange_rate: Option<Value>,
}

impl VerifyPaymentRequest {
    pub fn into_command(self) -> VerifyPaymentCommand {
        VerifyPaymentCommand {
            order_id: self.razorpay_order_id.unwrap_or_default(),
            payment_id: self.razorpay_payment_id.unwrap_or_default(),
            signature: self.razorpay_signature.unwrap_or_default(),
            buyer: BuyerDetails::new(self.name, self.email, self.phone),
            product_name: non_blank(self.product_name),
            original_usd_amount: self.original_usd_amount.as_ref().and_then(lenient_f64),
            exchange_rate: self.exchange_rate.as_ref().and_then(lenient_f64),
        }
    }
}

/// Failed or dismissed checkout reported by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentFailedRequest {
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    /// `null` when the buyer closed the widget.
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default, rename = "productName")]
    pub product_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl PaymentFailedRequest {
    pub fn into_command(self) -> RecordPaymentFailureCommand {
        RecordPaymentFailureCommand {
            order_id: self.razorpay_order_id.unwrap_or_default(),
            payment_id: non_blank(self.razorpay_payment_id),
            error_code: non_blank(self.error_code),
            error_description: non_blank(self.error_description),
            buyer: BuyerDetails::new(self.name, self.email, self.phone),
            product_name: non_blank(self.product_name),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Numbers may arrive as JSON numbers or numeric strings.
fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body for verification and failure-recording outcomes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutResponse {
    pub success: bool,
    pub message: String,
}

impl CheckoutResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Error body for order creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_request(body: Value) -> CreateOrderRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn amount_accepts_number_and_string() {
        assert_eq!(
            order_request(json!({"amount": 10})).amount_text().as_deref(),
            Some("10")
        );
        assert_eq!(
            order_request(json!({"amount": 19.995})).amount_text().as_deref(),
            Some("19.995")
        );
        assert_eq!(
            order_request(json!({"amount": "2500.50"})).amount_text().as_deref(),
            Some("2500.50")
        );
    }

    #[test]
    fn amount_absent_or_null_is_none() {
        assert_eq!(order_request(json!({})).amount_text(), None);
        assert_eq!(order_request(json!({"amount": null})).amount_text(), None);
        assert_eq!(order_request(json!({"amount": false})).amount_text(), None);
    }

    #[test]
    fn amount_other_json_passes_through_for_validation() {
        assert_eq!(
            order_request(json!({"amount": true})).amount_text().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn verify_request_reads_widget_and_client_fields() {
        let request: VerifyPaymentRequest = serde_json::from_value(json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": "abc",
            "productName": "Peach Serum",
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "",
            "originalUsdAmount": "29.99",
            "exchangeRate": 83.2
        }))
        .unwrap();

        let cmd = request.into_command();
        assert_eq!(cmd.order_id, "order_1");
        assert_eq!(cmd.payment_id, "pay_1");
        assert_eq!(cmd.signature, "abc");
        assert_eq!(cmd.product_name.as_deref(), Some("Peach Serum"));
        assert_eq!(cmd.buyer.name.as_deref(), Some("Asha"));
        assert_eq!(cmd.buyer.phone, None);
        assert_eq!(cmd.original_usd_amount, Some(29.99));
        assert_eq!(cmd.exchange_rate, Some(83.2));
    }

    #[test]
    fn verify_request_missing_ids_become_empty() {
        let request: VerifyPaymentRequest = serde_json::from_value(json!({})).unwrap();
        let cmd = request.into_command();
        assert!(cmd.order_id.is_empty());
        assert!(cmd.payment_id.is_empty());
        assert!(cmd.signature.is_empty());
    }

    #[test]
    fn failure_request_accepts_null_payment_id() {
        let request: PaymentFailedRequest = serde_json::from_value(json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": null,
            "error_code": "cancelled",
            "error_description": "Payment cancelled by user"
        }))
        .unwrap();

        let cmd = request.into_command();
        assert_eq!(cmd.order_id, "order_1");
        assert_eq!(cmd.payment_id, None);
        assert_eq!(cmd.error_code.as_deref(), Some("cancelled"));
    }

    #[test]
    fn checkout_response_serializes_success_flag() {
        let body = serde_json::to_value(CheckoutResponse::failed("Missing payment parameters"))
            .unwrap();
        assert_eq!(
            body,
            json!({"success": false, "message": "Missing payment parameters"})
        );
    }
}
