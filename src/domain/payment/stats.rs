//! Aggregate figures for the admin dashboard.

use rust_decimal::{Decimal, RoundingStrategy};

use super::money::minor_to_major;
use super::record::PaymentRecord;
use super::status::PaymentStatus;

/// Dashboard totals computed over every stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentStats {
    pub total_payments: usize,
    /// Sum of captured amounts in major units.
    pub total_revenue: Decimal,
    pub successful_payments: usize,
    /// Percentage of records that were captured.
    pub success_rate: Decimal,
    /// Failed and cancelled records.
    pub failed_payments: usize,
    /// Authorized records still awaiting capture.
    pub pending_payments: usize,
}

impl PaymentStats {
    pub fn from_records(records: &[PaymentRecord]) -> Self {
        let mut revenue_minor: i64 = 0;
        let mut successful = 0;
        let mut failed = 0;
        let mut pending = 0;

        for record in records {
            match record.status {
                PaymentStatus::Captured => {
                    successful += 1;
                    revenue_minor =
                        revenue_minor.saturating_add(record.amount_minor.unwrap_or_default());
                }
                PaymentStatus::Failed | PaymentStatus::Cancelled => failed += 1,
                PaymentStatus::Authorized => pending += 1,
                PaymentStatus::Refunded => {}
            }
        }

        let total = records.len();
        let success_rate = if total == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(successful as u64) * Decimal::ONE_HUNDRED / Decimal::from(total as u64))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };

        Self {
            total_payments: total,
            total_revenue: minor_to_major(revenue_minor),
            successful_payments: successful,
            success_rate,
            failed_payments: failed,
            pending_payments: pending,
        }
    }

    /// Revenue with exactly two decimal places, e.g. `"1498.00"`.
    pub fn formatted_revenue(&self) -> String {
        format!("{:.2}", self.total_revenue)
    }

    /// Success rate with exactly two decimal places, e.g. `"66.67"`.
    pub fn formatted_success_rate(&self) -> String {
        format!("{:.2}", self.success_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PaymentRecordId, Timestamp};
    use crate::domain::payment::BuyerDetails;

    fn record(status: PaymentStatus, amount_minor: Option<i64>) -> PaymentRecord {
        let now = Timestamp::now();
        PaymentRecord {
            id: PaymentRecordId::new(),
            payment_id: Some(format!("pay_{}", PaymentRecordId::new())),
            order_id: "order_1".to_string(),
            buyer: BuyerDetails::default(),
            product_name: None,
            amount_minor,
            currency: "INR".to_string(),
            payment_method: None,
            status,
            error_code: None,
            error_description: None,
            payment_date: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_store_has_zero_rate() {
        let stats = PaymentStats::from_records(&[]);
        assert_eq!(stats.total_payments, 0);
        assert_eq!(stats.formatted_revenue(), "0.00");
        assert_eq!(stats.formatted_success_rate(), "0.00");
    }

    #[test]
    fn only_captured_records_count_as_revenue() {
        let records = vec![
            record(PaymentStatus::Captured, Some(49900)),
            record(PaymentStatus::Captured, Some(99950)),
            record(PaymentStatus::Authorized, Some(10000)),
            record(PaymentStatus::Failed, None),
        ];
        let stats = PaymentStats::from_records(&records);

        assert_eq!(stats.formatted_revenue(), "1498.50");
        assert_eq!(stats.successful_payments, 2);
        assert_eq!(stats.pending_payments, 1);
        assert_eq!(stats.failed_payments, 1);
        assert_eq!(stats.formatted_success_rate(), "50.00");
    }

    #[test]
    fn cancelled_counts_as_failed() {
        let records = vec![
            record(PaymentStatus::Cancelled, None),
            record(PaymentStatus::Failed, None),
            record(PaymentStatus::Captured, Some(100)),
        ];
        let stats = PaymentStats::from_records(&records);

        assert_eq!(stats.failed_payments, 2);
        assert_eq!(stats.formatted_success_rate(), "33.33");
    }

    #[test]
    fn refunded_records_count_only_toward_total() {
        let records = vec![
            record(PaymentStatus::Refunded, Some(5000)),
            record(PaymentStatus::Captured, Some(5000)),
        ];
        let stats = PaymentStats::from_records(&records);

        assert_eq!(stats.total_payments, 2);
        assert_eq!(stats.formatted_revenue(), "50.00");
        assert_eq!(stats.successful_payments, 1);
    }
}
