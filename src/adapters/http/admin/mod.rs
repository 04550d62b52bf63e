//! HTTP adapter for the admin dashboard.
//!
//! Two-step login (password, then emailed code) followed by bearer-token
//! access to payment records and summary statistics.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    LoginRequest, LoginResponse, PaymentStatsView, PaymentView, PaymentsResponse, StatsResponse,
    TokenResponse, VerifyOtpRequest,
};
pub use handlers::{AdminApiError, AdminAppState, OTP_SENT_MESSAGE};
pub use routes::{admin_router, admin_routes};
