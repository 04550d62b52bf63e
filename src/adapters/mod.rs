//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `razorpay` - Payment gateway (REST API and test mock)
//! - `postgres` - Payment records in PostgreSQL
//! - `storage` - In-memory payment records and pending login codes
//! - `email` - Login code delivery (Resend, log, mock)
//! - `auth` - Admin bearer tokens (JWT)
//! - `http` - axum routes, handlers and middleware

pub mod auth;
pub mod email;
pub mod http;
pub mod postgres;
pub mod razorpay;
pub mod storage;
