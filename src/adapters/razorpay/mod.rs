//! Razorpay payment gateway adapter.
//!
//! Implements the `PaymentGateway` port for Razorpay:
//! - Order creation (`POST /v1/orders`)
//! - Payment lookup (`GET /v1/payments/{id}`)
//!
//! Checkout callback signatures are verified in the domain
//! (`SignatureVerifier`) with the same key secret.

mod gateway_types;
mod mock_gateway;
mod razorpay_adapter;

pub use gateway_types::{RazorpayOrder, RazorpayOrderRequest, RazorpayPayment};
pub use mock_gateway::MockPaymentGateway;
pub use razorpay_adapter::{RazorpayConfig, RazorpayPaymentAdapter, DEFAULT_API_BASE_URL};
