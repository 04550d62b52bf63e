//! Peche Checkout - Storefront payment backend
//!
//! Creates Razorpay orders, verifies checkout callback signatures, keeps an
//! idempotent record of every payment, and serves those records to an
//! OTP-protected admin dashboard.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
