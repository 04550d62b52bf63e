//! Admin handlers.
//!
//! ## Commands
//! - Password step of login (issues an emailed code)
//! - Code step of login (issues a bearer token)
//!
//! ## Queries
//! - List payment records
//! - Dashboard statistics

mod get_payment_stats;
mod list_payments;
mod request_otp;
mod verify_otp;

// Commands
pub use request_otp::{OtpSettings, RequestOtpCommand, RequestOtpHandler, RequestOtpResult};
pub use verify_otp::{VerifyOtpCommand, VerifyOtpHandler, VerifyOtpResult};

// Queries
pub use get_payment_stats::{GetPaymentStatsHandler, GetPaymentStatsQuery, GetPaymentStatsResult};
pub use list_payments::{ListPaymentsHandler, ListPaymentsQuery, ListPaymentsResult};
