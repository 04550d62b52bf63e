//! Axum router configuration for checkout endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_order, health, payment_failed, verify_payment, CheckoutAppState};

/// Create the checkout API router.
///
/// # Routes
///
/// - `GET /` - Liveness check
/// - `POST /create-order` - Create a gateway order
/// - `POST /verify-payment` - Verify a checkout callback and record the payment
/// - `POST /payment-failed` - Record a failed or dismissed checkout
pub fn checkout_routes() -> Router<CheckoutAppState> {
    Router::new()
        .route("/", get(health))
        .route("/create-order", post(create_order))
        .route("/verify-payment", post(verify_payment))
        .route("/payment-failed", post(payment_failed))
}
