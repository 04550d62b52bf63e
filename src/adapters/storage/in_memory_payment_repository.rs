//! In-Memory Payment Repository Adapter
//!
//! Stores payment records in process memory. Used when no database is
//! configured and in tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::payment::PaymentRecord;
use crate::ports::{PaymentRepository, SaveResult};

/// In-memory storage for payment records
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentRepository {
    records: Arc<RwLock<Vec<PaymentRecord>>>,
}

impl InMemoryPaymentRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored records
    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn insert_if_absent(&self, record: PaymentRecord) -> Result<SaveResult, DomainError> {
        // Check and insert under one write lock
        let mut records = self.records.write().await;

        let exists = match record.payment_id.as_deref() {
            Some(payment_id) => records
                .iter()
                .any(|r| r.payment_id.as_deref() == Some(payment_id)),
            None => records
                .iter()
                .any(|r| r.payment_id.is_none() && r.order_id == record.order_id),
        };
        if exists {
            return Ok(SaveResult::AlreadyExists);
        }

        records.push(record);
        Ok(SaveResult::Inserted)
    }

    async fn update(&self, record: &PaymentRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        let existing = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::PaymentNotFound, "Payment record not found")
                    .with_detail("record_id", record.id.to_string())
            })?;
        *existing = record.clone();
        Ok(())
    }

    async fn find_by_payment_id(
        &self,
        payment_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.payment_id.as_deref() == Some(payment_id))
            .cloned())
    }

    async fn list_recent(&self) -> Result<Vec<PaymentRecord>, DomainError> {
        let records = self.records.read().await;
        // Later inserts win ties on created_at
        let mut recent: Vec<PaymentRecord> = records.iter().rev().cloned().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recent)
    }
}
