//! Payment domain module.
//!
//! Order amounts, Razorpay signature verification and the payment record
//! lifecycle.
//!
//! # Module Structure
//!
//! - `money` - Major/minor currency unit conversion
//! - `order` - Order creation request built from a checkout amount
//! - `signature` - HMAC-SHA256 verification of widget callbacks
//! - `status` - PaymentStatus state machine
//! - `record` - PaymentRecord aggregate persisted after verification
//! - `stats` - Dashboard statistics derived from stored records
//! - `errors` - Checkout error vocabulary

mod errors;
mod money;
mod order;
mod record;
mod signature;
mod stats;
mod status;

pub use errors::CheckoutError;
pub use money::{minor_to_major, AmountError, MajorAmount};
pub use order::{OrderRequest, DEFAULT_CURRENCY};
pub use record::{BuyerDetails, FailureReport, PaymentRecord, VerifiedPayment};
pub use signature::SignatureVerifier;
pub use stats::PaymentStats;
pub use status::PaymentStatus;
