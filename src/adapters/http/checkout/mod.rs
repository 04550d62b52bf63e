//! HTTP adapter for the storefront checkout flow.
//!
//! Exposes order creation, callback verification and failure recording to
//! the checkout client.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CheckoutResponse, CreateOrderRequest, OrderErrorResponse, PaymentFailedRequest,
    VerifyPaymentRequest,
};
pub use handlers::{
    CheckoutApiError, CheckoutAppState, OrderApiError, ALREADY_VERIFIED_MESSAGE,
    FAILURE_RECORDED_MESSAGE, VERIFIED_MESSAGE,
};
pub use routes::checkout_routes;
