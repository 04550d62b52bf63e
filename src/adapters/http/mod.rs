//! HTTP adapters - REST API implementations.
//!
//! - `checkout` - Order creation and payment callbacks for the storefront
//! - `admin` - Dashboard login, payment records and statistics
//! - `middleware` - Admin bearer-token authentication
//!
//! `app_router` combines them behind the shared tracing, CORS and timeout
//! layers.

pub mod admin;
pub mod checkout;
pub mod middleware;
mod router;

// Re-export key types for convenience
pub use admin::{admin_router, AdminAppState};
pub use checkout::{checkout_routes, CheckoutAppState};
pub use router::app_router;
