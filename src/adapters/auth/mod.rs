//! Authentication adapters.
//!
//! Implementations of the `AdminTokenIssuer` and `AdminSessionValidator`
//! ports:
//!
//! - `jwt` - HS256 tokens signed with the configured admin secret

mod jwt;

pub use jwt::JwtAdminSessions;
