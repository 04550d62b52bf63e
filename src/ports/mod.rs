//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Checkout Ports
//!
//! - `PaymentGateway` - Order creation and payment lookup at the gateway
//! - `PaymentRepository` - Idempotent payment record persistence
//!
//! ## Admin Ports
//!
//! - `OtpStore` - Pending one-time codes
//! - `OtpSender` - Out-of-band code delivery
//! - `AdminTokenIssuer` / `AdminSessionValidator` - Bearer tokens

mod admin_session;
mod otp_sender;
mod otp_store;
mod payment_gateway;
mod payment_repository;

pub use admin_session::{AdminSessionValidator, AdminTokenIssuer};
pub use otp_sender::OtpSender;
pub use otp_store::OtpStore;
pub use payment_gateway::{
    GatewayError, GatewayErrorCode, GatewayOrder, GatewayPayment, PaymentGateway,
};
pub use payment_repository::{PaymentRepository, SaveResult};
