//! VerifyPaymentHandler - Command handler for checkout success callbacks.
//!
//! The checkout widget hands the client an order id, payment id and
//! signature. Only a signature that matches our own HMAC of the two ids
//! proves the payment came from the gateway. Verified payments are stored
//! once per payment id; repeated callbacks are acknowledged without a
//! second record.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::foundation::{PaymentRecordId, Timestamp};
use crate::domain::payment::{
    BuyerDetails, CheckoutError, PaymentRecord, PaymentStatus, SignatureVerifier,
    VerifiedPayment,
};
use crate::ports::{GatewayPayment, PaymentGateway, PaymentRepository, SaveResult};

/// Command to verify a completed checkout.
#[derive(Debug, Clone, Default)]
pub struct VerifyPaymentCommand {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
    pub buyer: BuyerDetails,
    pub product_name: Option<String>,
    /// Display-only USD price the client converted from.
    pub original_usd_amount: Option<f64>,
    /// USD to INR rate the client used.
    pub exchange_rate: Option<f64>,
}

/// Result of payment verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyPaymentResult {
    /// First verification of this payment; a record was written.
    Recorded {
        record_id: PaymentRecordId,
        status: PaymentStatus,
    },
    /// The payment was verified before; no new record was written.
    AlreadyVerified { status: PaymentStatus },
}

/// Handler for verifying checkout callbacks.
pub struct VerifyPaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
    repository: Arc<dyn PaymentRepository>,
    verifier: SignatureVerifier,
}

impl VerifyPaymentHandler {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        repository: Arc<dyn PaymentRepository>,
        verifier: SignatureVerifier,
    ) -> Self {
        Self {
            gateway,
            repository,
            verifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: VerifyPaymentCommand,
    ) -> Result<VerifyPaymentResult, CheckoutError> {
        // 1. All three identifiers are required
        if cmd.order_id.is_empty() || cmd.payment_id.is_empty() || cmd.signature.is_empty() {
            return Err(CheckoutError::MissingPaymentParameters);
        }

        // 2. Signature check
        if !self
            .verifier
            .verify(&cmd.order_id, &cmd.payment_id, &cmd.signature)
        {
            warn!(
                order_id = %cmd.order_id,
                payment_id = %cmd.payment_id,
                "Payment signature mismatch"
            );
            return Err(CheckoutError::SignatureMismatch);
        }

        debug!(
            order_id = %cmd.order_id,
            payment_id = %cmd.payment_id,
            original_usd_amount = ?cmd.original_usd_amount,
            exchange_rate = ?cmd.exchange_rate,
            "Payment signature verified"
        );

        // 3. Repeat callbacks for a known payment
        if let Some(existing) = self
            .repository
            .find_by_payment_id(&cmd.payment_id)
            .await
            .map_err(CheckoutError::from)?
        {
            return self.reconcile(existing, None).await;
        }

        // 4. Enrich from the gateway and store
        let payment = self.fetch_payment(&cmd.payment_id).await?;

        let status = PaymentStatus::from_gateway(&payment.status).unwrap_or_else(|| {
            warn!(
                payment_id = %payment.id,
                gateway_status = %payment.status,
                "Unknown gateway payment status, recording as authorized"
            );
            PaymentStatus::Authorized
        });

        let verified = VerifiedPayment {
            payment_id: cmd.payment_id.clone(),
            order_id: cmd.order_id.clone(),
            buyer: cmd
                .buyer
                .with_gateway_contact(payment.email.clone(), payment.contact.clone()),
            product_name: cmd.product_name,
            amount_minor: Some(payment.amount),
            currency: payment.currency.clone(),
            payment_method: payment.method.clone(),
            status,
        };
        let record = PaymentRecord::verified(verified, Timestamp::now());
        let record_id = record.id;

        match self
            .repository
            .insert_if_absent(record)
            .await
            .map_err(CheckoutError::from)?
        {
            SaveResult::Inserted => {
                info!(
                    order_id = %cmd.order_id,
                    payment_id = %cmd.payment_id,
                    status = %status,
                    "Payment verified and recorded"
                );
                Ok(VerifyPaymentResult::Recorded { record_id, status })
            }
            SaveResult::AlreadyExists => {
                debug!(payment_id = %cmd.payment_id, "Concurrent write already recorded this payment");
                match self
                    .repository
                    .find_by_payment_id(&cmd.payment_id)
                    .await
                    .map_err(CheckoutError::from)?
                {
                    Some(existing) => self.reconcile(existing, Some(payment)).await,
                    None => Ok(VerifyPaymentResult::AlreadyVerified { status }),
                }
            }
        }
    }

    /// Brings a stored record in line with a validly signed callback.
    ///
    /// Pending and unpaid records are re-checked against the gateway. A
    /// record the gateway still reports as failed is not acknowledged.
    async fn reconcile(
        &self,
        mut record: PaymentRecord,
        fetched: Option<GatewayPayment>,
    ) -> Result<VerifyPaymentResult, CheckoutError> {
        let was_unpaid = record.status.is_unpaid();

        if record.status.needs_gateway_check() {
            if let Some(payment_id) = record.payment_id.clone() {
                let payment = match fetched {
                    Some(payment) => payment,
                    None => self.fetch_payment(&payment_id).await?,
                };
                self.apply_gateway_payment(&mut record, payment).await?;
            }
        }

        let status = record.status;
        if status.is_unpaid() {
            warn!(
                payment_id = ?record.payment_id,
                status = %status,
                "Signed callback for a payment the gateway has not completed"
            );
            return Err(CheckoutError::PaymentNotCompleted {
                status: status.as_str().to_string(),
            });
        }

        if was_unpaid {
            Ok(VerifyPaymentResult::Recorded {
                record_id: record.id,
                status,
            })
        } else {
            Ok(VerifyPaymentResult::AlreadyVerified { status })
        }
    }

    async fn apply_gateway_payment(
        &self,
        record: &mut PaymentRecord,
        payment: GatewayPayment,
    ) -> Result<(), CheckoutError> {
        let Some(latest) = PaymentStatus::from_gateway(&payment.status) else {
            return Ok(());
        };

        match record.apply_gateway_status(latest, Timestamp::now()) {
            Ok(true) => {
                record.settle_from_gateway(
                    payment.amount,
                    &payment.currency,
                    payment.method,
                    payment.email,
                    payment.contact,
                );
                self.repository
                    .update(record)
                    .await
                    .map_err(CheckoutError::from)?;
                info!(payment_id = %payment.id, status = %record.status, "Payment status updated");
            }
            Ok(false) => {}
            Err(e) => {
                warn!(payment_id = %payment.id, error = %e, "Ignoring gateway status");
            }
        }
        Ok(())
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, CheckoutError> {
        self.gateway.fetch_payment(payment_id).await.map_err(|e| {
            warn!(payment_id = %payment_id, error = %e, "Gateway payment fetch failed");
            CheckoutError::gateway(e.to_string())
        })
    }
}
