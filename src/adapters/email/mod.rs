//! Email adapters implementing the `OtpSender` port.
//!
//! - **ResendOtpSender** - Delivers codes through the Resend API
//! - **LogOtpSender** - Logs codes (development only)
//! - **MockOtpSender** - Captures codes for tests

mod log_otp_sender;
mod mock_otp_sender;
mod resend_otp_sender;

pub use log_otp_sender::LogOtpSender;
pub use mock_otp_sender::MockOtpSender;
pub use resend_otp_sender::{ResendConfig, ResendOtpSender, DEFAULT_RESEND_BASE_URL};
