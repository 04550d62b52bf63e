//! Storage Adapters
//!
//! In-process implementations of the persistence ports.
//!
//! ## Available Adapters
//!
//! - **InMemoryPaymentRepository** - Payment records (no database configured, tests)
//! - **InMemoryOtpStore** - Pending admin login codes
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryOtpStore, InMemoryPaymentRepository};
//!
//! let payments = Arc::new(InMemoryPaymentRepository::new());
//! let otps = Arc::new(InMemoryOtpStore::new());
//! ```

mod in_memory_otp_store;
mod in_memory_payment_repository;

pub use in_memory_otp_store::InMemoryOtpStore;
pub use in_memory_payment_repository::InMemoryPaymentRepository;
