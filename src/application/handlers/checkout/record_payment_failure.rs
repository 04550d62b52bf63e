//! RecordPaymentFailureHandler - Command handler for failed or abandoned checkouts.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::foundation::{PaymentRecordId, Timestamp};
use crate::domain::payment::{
    BuyerDetails, CheckoutError, FailureReport, PaymentRecord, PaymentStatus,
};
use crate::ports::{PaymentRepository, SaveResult};

/// Command to record a checkout that did not complete.
#[derive(Debug, Clone, Default)]
pub struct RecordPaymentFailureCommand {
    pub order_id: String,
    /// Absent when the buyer closed the widget before paying.
    pub payment_id: Option<String>,
    pub error_code: Option<String>,
    pub error_description: Option<String>,
    pub buyer: BuyerDetails,
    pub product_name: Option<String>,
}

/// Result of failure recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordPaymentFailureResult {
    Recorded {
        record_id: PaymentRecordId,
        status: PaymentStatus,
    },
    /// A record for this payment id, or for this abandoned order, already existed.
    AlreadyRecorded { status: PaymentStatus },
}

/// Handler for recording payment failures.
pub struct RecordPaymentFailureHandler {
    repository: Arc<dyn PaymentRepository>,
    currency: String,
}

impl RecordPaymentFailureHandler {
    pub fn new(repository: Arc<dyn PaymentRepository>, currency: impl Into<String>) -> Self {
        Self {
            repository,
            currency: currency.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordPaymentFailureCommand,
    ) -> Result<RecordPaymentFailureResult, CheckoutError> {
        if cmd.order_id.trim().is_empty() {
            return Err(CheckoutError::MissingOrderId);
        }

        let report = FailureReport {
            order_id: cmd.order_id,
            payment_id: cmd.payment_id.filter(|id| !id.is_empty()),
            error_code: cmd.error_code,
            error_description: cmd.error_description,
            buyer: cmd.buyer,
            product_name: cmd.product_name,
            currency: self.currency.clone(),
        };
        let status = report.status();
        let now = Timestamp::now();

        // An authorized payment that later fails moves to failed in place
        if let Some(payment_id) = report.payment_id.as_deref() {
            if let Some(mut existing) = self
                .repository
                .find_by_payment_id(payment_id)
                .await
                .map_err(CheckoutError::from)?
            {
                if existing.status.is_pending() {
                    match existing.apply_gateway_status(status, now) {
                        Ok(true) => {
                            self.repository
                                .update(&existing)
                                .await
                                .map_err(CheckoutError::from)?;
                            info!(payment_id = %payment_id, status = %existing.status, "Pending payment marked failed");
                        }
                        Ok(false) => {}
                        Err(e) => warn!(payment_id = %payment_id, error = %e, "Ignoring failure report"),
                    }
                }
                return Ok(RecordPaymentFailureResult::AlreadyRecorded {
                    status: existing.status,
                });
            }
        }

        let order_id = report.order_id.clone();
        let record = PaymentRecord::failed(report, now);
        let record_id = record.id;

        match self
            .repository
            .insert_if_absent(record)
            .await
            .map_err(CheckoutError::from)?
        {
            SaveResult::Inserted => {
                info!(order_id = %order_id, status = %status, "Payment failure recorded");
                Ok(RecordPaymentFailureResult::Recorded { record_id, status })
            }
            SaveResult::AlreadyExists => {
                debug!(order_id = %order_id, "Payment failure already recorded");
                Ok(RecordPaymentFailureResult::AlreadyRecorded { status })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryPaymentRepository;
    use crate::domain::payment::VerifiedPayment;

    fn handler(repository: &InMemoryPaymentRepository) -> RecordPaymentFailureHandler {
        RecordPaymentFailureHandler::new(Arc::new(repository.clone()), "INR")
    }

    fn command(payment_id: Option<&str>, error_code: &str) -> RecordPaymentFailureCommand {
        RecordPaymentFailureCommand {
            order_id: "order_1".to_string(),
            payment_id: payment_id.map(String::from),
            error_code: Some(error_code.to_string()),
            error_description: Some("Something went wrong".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn dismissed_widget_records_cancellation() {
        let repo = InMemoryPaymentRepository::new();

        let result = handler(&repo).handle(command(None, "cancelled")).await.unwrap();

        assert!(matches!(
            result,
            RecordPaymentFailureResult::Recorded {
                status: PaymentStatus::Cancelled,
                ..
            }
        ));
        let records = repo.list_recent().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].payment_id, None);
        assert_eq!(records[0].currency, "INR");
    }

    #[tokio::test]
    async fn repeated_dismissals_of_one_order_write_one_record() {
        let repo = InMemoryPaymentRepository::new();

        for _ in 0..3 {
            handler(&repo).handle(command(None, "cancelled")).await.unwrap();
        }
        let last = handler(&repo).handle(command(None, "cancelled")).await.unwrap();

        assert_eq!(
            last,
            RecordPaymentFailureResult::AlreadyRecorded {
                status: PaymentStatus::Cancelled
            }
        );
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn gateway_error_records_failure() {
        let repo = InMemoryPaymentRepository::new();

        let result = handler(&repo)
            .handle(command(Some("pay_1"), "BAD_REQUEST_ERROR"))
            .await
            .unwrap();

        assert!(matches!(
            result,
            RecordPaymentFailureResult::Recorded {
                status: PaymentStatus::Failed,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn missing_order_id_is_rejected() {
        let repo = InMemoryPaymentRepository::new();
        let mut cmd = command(None, "cancelled");
        cmd.order_id = " ".to_string();

        let err = handler(&repo).handle(cmd).await.unwrap_err();

        assert_eq!(err, CheckoutError::MissingOrderId);
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn repeated_failure_for_one_payment_writes_one_record() {
        let repo = InMemoryPaymentRepository::new();

        handler(&repo)
            .handle(command(Some("pay_1"), "BAD_REQUEST_ERROR"))
            .await
            .unwrap();
        let second = handler(&repo)
            .handle(command(Some("pay_1"), "BAD_REQUEST_ERROR"))
            .await
            .unwrap();

        assert_eq!(
            second,
            RecordPaymentFailureResult::AlreadyRecorded {
                status: PaymentStatus::Failed
            }
        );
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn failure_for_authorized_payment_updates_it() {
        let repo = InMemoryPaymentRepository::new();
        let authorized = PaymentRecord::verified(
            VerifiedPayment {
                payment_id: "pay_1".to_string(),
                order_id: "order_1".to_string(),
                buyer: BuyerDetails::default(),
                product_name: None,
                amount_minor: Some(1000),
                currency: "INR".to_string(),
                payment_method: None,
                status: PaymentStatus::Authorized,
            },
            Timestamp::now(),
        );
        repo.insert_if_absent(authorized).await.unwrap();

        let result = handler(&repo)
            .handle(command(Some("pay_1"), "BAD_REQUEST_ERROR"))
            .await
            .unwrap();

        assert_eq!(
            result,
            RecordPaymentFailureResult::AlreadyRecorded {
                status: PaymentStatus::Failed
            }
        );
        assert_eq!(repo.count().await, 1);
    }
}
