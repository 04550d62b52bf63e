//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresPaymentRepository` - Payment records with idempotent inserts
//!
//! The schema lives in `migrations/` and is applied at startup with
//! `sqlx::migrate!`.

mod payment_repository;

pub use payment_repository::PostgresPaymentRepository;
