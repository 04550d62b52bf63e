//! GetPaymentStatsHandler - Query handler for admin dashboard totals.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::payment::PaymentStats;
use crate::ports::PaymentRepository;

/// Query for dashboard statistics.
#[derive(Debug, Clone)]
pub struct GetPaymentStatsQuery;

pub type GetPaymentStatsResult = PaymentStats;

/// Computes totals over every stored record.
pub struct GetPaymentStatsHandler {
    repository: Arc<dyn PaymentRepository>,
}

impl GetPaymentStatsHandler {
    pub fn new(repository: Arc<dyn PaymentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        _query: GetPaymentStatsQuery,
    ) -> Result<GetPaymentStatsResult, DomainError> {
        let records = self.repository.list_recent().await?;
        Ok(PaymentStats::from_records(&records))
    }
}
