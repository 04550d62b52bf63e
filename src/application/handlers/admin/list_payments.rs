//! ListPaymentsHandler - Query handler for the admin payment table.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::payment::PaymentRecord;
use crate::ports::PaymentRepository;

/// Query for all payment records.
#[derive(Debug, Clone)]
pub struct ListPaymentsQuery;

/// Records newest first.
pub type ListPaymentsResult = Vec<PaymentRecord>;

pub struct ListPaymentsHandler {
    repository: Arc<dyn PaymentRepository>,
}

impl ListPaymentsHandler {
    pub fn new(repository: Arc<dyn PaymentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, _query: ListPaymentsQuery) -> Result<ListPaymentsResult, DomainError> {
        self.repository.list_recent().await
    }
}
