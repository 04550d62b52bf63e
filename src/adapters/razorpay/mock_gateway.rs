//! Mock payment gateway for testing.
//!
//! Provides a configurable mock implementation of `PaymentGateway` for unit
//! and integration tests. Supports:
//! - Pre-configured payments
//! - Error injection
//! - Call counting per method

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::json;

use crate::domain::payment::OrderRequest;
use crate::ports::{GatewayError, GatewayOrder, GatewayPayment, PaymentGateway};

/// Mock payment gateway for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentGateway::new();
///
/// // Configure a payment the gateway knows about
/// mock.add_payment(MockPaymentGateway::captured_payment("pay_123", "order_123", 49900));
///
/// // Inject errors
/// mock.set_method_error("create_order", GatewayError::network("timeout"));
/// ```
#[derive(Default)]
pub struct MockPaymentGateway {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Orders created so far, by id.
    orders: HashMap<String, GatewayOrder>,

    /// Pre-configured payments by id.
    payments: HashMap<String, GatewayPayment>,

    /// Error to return on next call.
    next_error: Option<GatewayError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, GatewayError>,

    /// Names of the methods called, in call order.
    call_log: Vec<&'static str>,

    /// Order requests received, in call order.
    order_requests: Vec<OrderRequest>,
}

impl MockPaymentGateway {
    /// Create a new mock gateway with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A captured card payment for the given order.
    pub fn captured_payment(payment_id: &str, order_id: &str, amount: i64) -> GatewayPayment {
        GatewayPayment {
            id: payment_id.to_string(),
            order_id: Some(order_id.to_string()),
            amount,
            currency: "INR".to_string(),
            status: "captured".to_string(),
            method: Some("card".to_string()),
            email: Some("buyer@example.com".to_string()),
            contact: Some("+919876543210".to_string()),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Add a payment the gateway will return from `fetch_payment`.
    pub fn add_payment(&self, payment: GatewayPayment) {
        let id = payment.id.clone();
        self.state().payments.insert(id, payment);
    }

    /// Change the status of a configured payment.
    pub fn set_payment_status(&self, payment_id: &str, status: &str) {
        if let Some(payment) = self.state().payments.get_mut(payment_id) {
            payment.status = status.to_string();
        }
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: GatewayError) {
        self.state().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: GatewayError) {
        self.state().method_errors.insert(method.to_string(), error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.state().call_log.iter().any(|c| *c == method)
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| **c == method)
            .count()
    }

    /// Order requests received so far.
    pub fn order_requests(&self) -> Vec<OrderRequest> {
        self.state().order_requests.clone()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_call(&self, method: &'static str) {
        self.state().call_log.push(method);
    }

    fn check_error(&self, method: &str) -> Result<(), GatewayError> {
        let mut state = self.state();

        // Method-specific errors persist
        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // Global error is consumed
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockPaymentGateway {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(&self, request: OrderRequest) -> Result<GatewayOrder, GatewayError> {
        self.record_call("create_order");
        self.check_error("create_order")?;

        let mut state = self.state();
        state.order_requests.push(request.clone());

        let id = format!("order_mock{}", state.orders.len() + 1);
        let raw = json!({
            "id": id,
            "entity": "order",
            "amount": request.amount,
            "amount_paid": 0,
            "amount_due": request.amount,
            "currency": request.currency,
            "receipt": request.receipt,
            "status": "created",
            "attempts": 0,
            "notes": [],
        });
        let order = GatewayOrder {
            id: id.clone(),
            amount: request.amount,
            currency: request.currency,
            receipt: Some(request.receipt),
            status: "created".to_string(),
            raw,
        };
        state.orders.insert(id, order.clone());

        Ok(order)
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError> {
        self.record_call("fetch_payment");
        self.check_error("fetch_payment")?;

        self.state()
            .payments
            .get(payment_id)
            .cloned()
            .ok_or_else(|| GatewayError::not_found("Payment"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::payment::MajorAmount;
    use crate::ports::GatewayErrorCode;

    fn order_request(amount: &str) -> OrderRequest {
        OrderRequest::for_checkout(
            MajorAmount::parse(amount).unwrap(),
            "INR",
            Timestamp::from_unix_secs(1_700_000_000),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn create_order_returns_created_order() {
        let mock = MockPaymentGateway::new();

        let order = mock.create_order(order_request("10")).await.unwrap();

        assert_eq!(order.amount, 1000);
        assert_eq!(order.status, "created");
        assert_eq!(order.raw["receipt"], "receipt_1700000000000");
        assert_eq!(mock.call_count("create_order"), 1);
    }

    #[tokio::test]
    async fn fetch_payment_returns_configured_payment() {
        let mock = MockPaymentGateway::new();
        mock.add_payment(MockPaymentGateway::captured_payment("pay_1", "order_1", 1000));

        let payment = mock.fetch_payment("pay_1").await.unwrap();

        assert_eq!(payment.status, "captured");
        assert!(mock.was_called("fetch_payment"));
    }

    #[tokio::test]
    async fn fetch_unknown_payment_is_not_found() {
        let mock = MockPaymentGateway::new();

        let err = mock.fetch_payment("pay_missing").await.unwrap_err();

        assert_eq!(err.code, GatewayErrorCode::NotFound);
    }

    #[tokio::test]
    async fn global_error_is_consumed_by_one_call() {
        let mock = MockPaymentGateway::new();
        mock.set_error(GatewayError::network("connection reset"));

        assert!(mock.create_order(order_request("10")).await.is_err());
        assert!(mock.create_order(order_request("10")).await.is_ok());
    }

    #[tokio::test]
    async fn method_error_persists_until_cleared() {
        let mock = MockPaymentGateway::new();
        mock.set_method_error("create_order", GatewayError::authentication("bad key"));

        assert!(mock.create_order(order_request("10")).await.is_err());
        assert!(mock.create_order(order_request("10")).await.is_err());

        mock.clear_errors();
        assert!(mock.create_order(order_request("10")).await.is_ok());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let mock = MockPaymentGateway::new();
        let clone = mock.clone();

        clone.create_order(order_request("5")).await.unwrap();

        assert_eq!(mock.order_requests().len(), 1);
        assert_eq!(mock.order_requests()[0].amount, 500);
    }
}
