//! Admin domain - dashboard access via password plus emailed one-time code.

mod access;
mod errors;
mod identity;
mod otp;

pub use access::AdminAccessPolicy;
pub(crate) use access::normalize_email;
pub use errors::AdminAuthError;
pub use identity::AdminIdentity;
pub use otp::{generate_otp_code, OtpChallenge, OTP_LENGTH};
