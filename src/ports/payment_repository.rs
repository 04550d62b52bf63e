//! PaymentRepository port - persistence for payment records.
//!
//! Gateway callbacks and client retries can deliver the same payment more
//! than once, so inserts are keyed on the gateway payment id and never
//! overwrite an existing record.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::payment::PaymentRecord;

/// Result of attempting to insert a payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// Record was inserted (first time seeing this payment).
    Inserted,
    /// A record with the same key already exists.
    AlreadyExists,
}

/// Port for storing and listing payment records.
///
/// Implementations should use a unique constraint on `payment_id`, and on
/// `order_id` among records without one, so that concurrent writes for one
/// payment or abandoned order produce a single record.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Inserts the record unless one with the same payment id exists.
    ///
    /// Records without a payment id (abandoned checkouts) are keyed on the
    /// order id instead, so an order has at most one of them.
    async fn insert_if_absent(&self, record: PaymentRecord) -> Result<SaveResult, DomainError>;

    /// Overwrites an existing record, matched by record id.
    async fn update(&self, record: &PaymentRecord) -> Result<(), DomainError>;

    /// Finds a record by gateway payment id.
    async fn find_by_payment_id(&self, payment_id: &str)
        -> Result<Option<PaymentRecord>, DomainError>;

    /// All records, newest first.
    async fn list_recent(&self) -> Result<Vec<PaymentRecord>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PaymentRepository) {}
    }

    #[tokio::test]
    async fn payment_repository_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PaymentRepository>();
    }
}
