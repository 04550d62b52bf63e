//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `payment` - Orders, signature verification and payment records
//! - `admin` - Dashboard login policy, one-time codes and admin identity

pub mod admin;
pub mod foundation;
pub mod payment;
