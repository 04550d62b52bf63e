//! HTTP handlers for checkout endpoints.
//!
//! These handlers connect axum routes to application layer command handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

use crate::application::handlers::checkout::{
    CreateOrderHandler, RecordPaymentFailureHandler, VerifyPaymentHandler, VerifyPaymentResult,
};
use crate::domain::payment::{CheckoutError, SignatureVerifier};
use crate::ports::{PaymentGateway, PaymentRepository};

use super::dto::{
    CheckoutResponse, CreateOrderRequest, OrderErrorResponse, PaymentFailedRequest,
    VerifyPaymentRequest,
};

pub const VERIFIED_MESSAGE: &str = "Payment verified and user info saved.";
pub const ALREADY_VERIFIED_MESSAGE: &str = "Payment already verified.";
pub const FAILURE_RECORDED_MESSAGE: &str = "Payment failure recorded.";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Application state for checkout routes.
#[derive(Clone)]
pub struct CheckoutAppState {
    pub gateway: Arc<dyn PaymentGateway>,
    pub repository: Arc<dyn PaymentRepository>,
    pub verifier: SignatureVerifier,
    /// Currency for new orders.
    pub currency: String,
}

impl CheckoutAppState {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        repository: Arc<dyn PaymentRepository>,
        verifier: SignatureVerifier,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            repository,
            verifier,
            currency: currency.into(),
        }
    }

    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(self.gateway.clone(), self.currency.clone())
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.gateway.clone(),
            self.repository.clone(),
            self.verifier.clone(),
        )
    }

    pub fn record_payment_failure_handler(&self) -> RecordPaymentFailureHandler {
        RecordPaymentFailureHandler::new(self.repository.clone(), self.currency.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - Liveness check
pub async fn health() -> &'static str {
    "Peche checkout backend is running"
}

/// POST /create-order - Create a gateway order for the cart total
///
/// Responds with the gateway's order object verbatim; the client hands it
/// to the checkout widget.
pub async fn create_order(
    State(state): State<CheckoutAppState>,
    payload: Option<Json<CreateOrderRequest>>,
) -> Result<Json<Value>, OrderApiError> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let handler = state.create_order_handler();

    let result = handler.handle(request.into_command()).await?;

    Ok(Json(result.order.raw))
}

/// POST /verify-payment - Verify a checkout callback and record the payment
pub async fn verify_payment(
    State(state): State<CheckoutAppState>,
    payload: Option<Json<VerifyPaymentRequest>>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let handler = state.verify_payment_handler();

    let result = handler
        .handle(request.into_command())
        .await
        .map_err(CheckoutApiError::verification)?;

    let message = match result {
        VerifyPaymentResult::Recorded { .. } => VERIFIED_MESSAGE,
        VerifyPaymentResult::AlreadyVerified { .. } => ALREADY_VERIFIED_MESSAGE,
    };
    Ok(Json(CheckoutResponse::ok(message)))
}

/// POST /payment-failed - Record a failed or dismissed checkout
pub async fn payment_failed(
    State(state): State<CheckoutAppState>,
    payload: Option<Json<PaymentFailedRequest>>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let handler = state.record_payment_failure_handler();

    handler
        .handle(request.into_command())
        .await
        .map_err(CheckoutApiError::failure_report)?;

    Ok(Json(CheckoutResponse::ok(FAILURE_RECORDED_MESSAGE)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Error body shape for `/create-order`: `{"error": ...}`.
#[derive(Debug)]
pub struct OrderApiError(CheckoutError);

impl From<CheckoutError> for OrderApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for OrderApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = if self.0.is_client_error() {
            (StatusCode::BAD_REQUEST, self.0.message())
        } else {
            tracing::error!(error = %self.0, "Order creation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error creating order".to_string(),
            )
        };

        (status, Json(OrderErrorResponse { error: message })).into_response()
    }
}

/// Error body shape for callbacks: `{"success": false, "message": ...}`.
#[derive(Debug)]
pub struct CheckoutApiError {
    error: CheckoutError,
    /// Shown instead of internal details for server-side failures.
    server_message: &'static str,
}

impl CheckoutApiError {
    pub fn verification(error: CheckoutError) -> Self {
        Self {
            error,
            server_message: "Server error during verification",
        }
    }

    pub fn failure_report(error: CheckoutError) -> Self {
        Self {
            error,
            server_message: "Server error while recording payment failure",
        }
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self.error {
            e if e.is_client_error() => (StatusCode::BAD_REQUEST, e.message()),
            CheckoutError::InvalidState { .. } | CheckoutError::PaymentNotCompleted { .. } => {
                (StatusCode::CONFLICT, self.error.message())
            }
            e => {
                tracing::error!(error = %e, "Checkout request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    self.server_message.to_string(),
                )
            }
        };

        (status, Json(CheckoutResponse::failed(message))).into_response()
    }
}
