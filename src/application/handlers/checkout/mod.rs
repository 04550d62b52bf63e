//! Checkout handlers.
//!
//! ## Commands
//! - Creating gateway orders
//! - Verifying checkout callbacks
//! - Recording failed or abandoned checkouts

mod create_order;
mod record_payment_failure;
mod verify_payment;

pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
pub use record_payment_failure::{
    RecordPaymentFailureCommand, RecordPaymentFailureHandler, RecordPaymentFailureResult,
};
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};
