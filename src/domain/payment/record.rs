//! Stored payment records and the inputs that create them.

use crate::domain::foundation::{PaymentRecordId, StateMachine, Timestamp};

use super::errors::CheckoutError;
use super::status::PaymentStatus;

/// Error code the checkout widget reports when the buyer closes it.
const CANCELLED_ERROR_CODE: &str = "cancelled";

/// Contact details collected from the buyer at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuyerDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl BuyerDetails {
    pub fn new(name: Option<String>, email: Option<String>, phone: Option<String>) -> Self {
        Self {
            name: non_blank(name),
            email: non_blank(email),
            phone: non_blank(phone),
        }
    }

    /// Prefers the contact details the gateway holds for the payment.
    ///
    /// The gateway values are what the buyer actually paid with, so they
    /// replace form input whenever they are present.
    pub fn with_gateway_contact(self, email: Option<String>, contact: Option<String>) -> Self {
        Self {
            name: self.name,
            email: non_blank(email).or(self.email),
            phone: non_blank(contact).or(self.phone),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A signature-verified payment enriched with gateway details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPayment {
    pub payment_id: String,
    pub order_id: String,
    pub buyer: BuyerDetails,
    pub product_name: Option<String>,
    pub amount_minor: Option<i64>,
    pub currency: String,
    pub payment_method: Option<String>,
    pub status: PaymentStatus,
}

/// A failed or abandoned checkout reported by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    pub order_id: String,
    pub payment_id: Option<String>,
    pub error_code: Option<String>,
    pub error_description: Option<String>,
    pub buyer: BuyerDetails,
    pub product_name: Option<String>,
    pub currency: String,
}

impl FailureReport {
    /// Status the report should be stored with.
    pub fn status(&self) -> PaymentStatus {
        match self.error_code.as_deref() {
            Some(CANCELLED_ERROR_CODE) => PaymentStatus::Cancelled,
            _ => PaymentStatus::Failed,
        }
    }
}

/// A persisted payment outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub id: PaymentRecordId,
    /// Absent when the buyer abandoned checkout before paying.
    pub payment_id: Option<String>,
    pub order_id: String,
    pub buyer: BuyerDetails,
    pub product_name: Option<String>,
    /// Minor units. Unknown for failures reported without gateway data.
    pub amount_minor: Option<i64>,
    pub currency: String,
    pub payment_method: Option<String>,
    pub status: PaymentStatus,
    pub error_code: Option<String>,
    pub error_description: Option<String>,
    pub payment_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PaymentRecord {
    /// Record for a payment whose signature checked out.
    pub fn verified(payment: VerifiedPayment, now: Timestamp) -> Self {
        Self {
            id: PaymentRecordId::new(),
            payment_id: Some(payment.payment_id),
            order_id: payment.order_id,
            buyer: payment.buyer,
            product_name: payment.product_name,
            amount_minor: payment.amount_minor,
            currency: payment.currency,
            payment_method: payment.payment_method,
            status: payment.status,
            error_code: None,
            error_description: None,
            payment_date: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record for a failed or cancelled checkout.
    pub fn failed(report: FailureReport, now: Timestamp) -> Self {
        let status = report.status();
        Self {
            id: PaymentRecordId::new(),
            payment_id: report.payment_id.filter(|id| !id.is_empty()),
            order_id: report.order_id,
            buyer: report.buyer,
            product_name: report.product_name,
            amount_minor: None,
            currency: report.currency,
            payment_method: None,
            status,
            error_code: report.error_code,
            error_description: report.error_description,
            payment_date: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the record to the status the gateway now reports.
    ///
    /// Returns `Ok(false)` when the record already has that status.
    pub fn apply_gateway_status(
        &mut self,
        status: PaymentStatus,
        now: Timestamp,
    ) -> Result<bool, CheckoutError> {
        if self.status == status {
            return Ok(false);
        }
        let current = self.status;
        self.status = current
            .transition_to(status)
            .map_err(|_| CheckoutError::invalid_state(current.as_str(), status.as_str()))?;
        self.updated_at = now;
        Ok(true)
    }

    /// Fills in what the gateway knows about a payment that was first
    /// stored from a failure report.
    ///
    /// Only applies once the record has left the unpaid states; the error
    /// fields from the earlier report are cleared.
    pub fn settle_from_gateway(
        &mut self,
        amount_minor: i64,
        currency: &str,
        payment_method: Option<String>,
        email: Option<String>,
        contact: Option<String>,
    ) {
        if self.status.is_unpaid() {
            return;
        }
        self.amount_minor = Some(amount_minor);
        self.currency = currency.to_string();
        self.payment_method = payment_method.or(self.payment_method.take());
        self.buyer = std::mem::take(&mut self.buyer).with_gateway_contact(email, contact);
        self.error_code = None;
        self.error_description = None;
    }

    pub fn is_captured(&self) -> bool {
        self.status == PaymentStatus::Captured
    }
}
