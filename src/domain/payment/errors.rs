//! Checkout-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MissingAmount | 400 |
//! | InvalidAmount | 400 |
//! | MissingPaymentParameters | 400 |
//! | MissingOrderId | 400 |
//! | SignatureMismatch | 400 |
//! | InvalidState | 409 |
//! | PaymentNotCompleted | 409 |
//! | Gateway | 500 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode};

use super::money::AmountError;

/// Errors raised while creating orders and recording payments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Order creation was requested without an amount.
    MissingAmount,

    /// The amount was present but unusable.
    InvalidAmount(AmountError),

    /// One of order id, payment id or signature was absent.
    MissingPaymentParameters,

    /// A failure report did not name the order it belongs to.
    MissingOrderId,

    /// The supplied signature does not match the recomputed one.
    SignatureMismatch,

    /// Stored record cannot move to the requested status.
    InvalidState {
        current: String,
        attempted: String,
    },

    /// Signature checked out but the gateway still reports the payment
    /// as failed.
    PaymentNotCompleted { status: String },

    /// The payment gateway rejected or failed a call.
    Gateway(String),

    /// Storage or other infrastructure failure.
    Infrastructure(String),
}

impl CheckoutError {
    pub fn invalid_amount(err: AmountError) -> Self {
        match err {
            AmountError::Missing => CheckoutError::MissingAmount,
            other => CheckoutError::InvalidAmount(other),
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        CheckoutError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        CheckoutError::Gateway(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CheckoutError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CheckoutError::MissingAmount
            | CheckoutError::InvalidAmount(_)
            | CheckoutError::MissingPaymentParameters
            | CheckoutError::MissingOrderId => ErrorCode::ValidationFailed,
            CheckoutError::SignatureMismatch => ErrorCode::SignatureMismatch,
            CheckoutError::InvalidState { .. } | CheckoutError::PaymentNotCompleted { .. } => {
                ErrorCode::InvalidStateTransition
            }
            CheckoutError::Gateway(_) => ErrorCode::GatewayError,
            CheckoutError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns the message shown to the checkout client.
    ///
    /// Gateway and infrastructure details are logged, never echoed.
    pub fn message(&self) -> String {
        match self {
            CheckoutError::MissingAmount => "Amount is required".to_string(),
            CheckoutError::InvalidAmount(err) => err.to_string(),
            CheckoutError::MissingPaymentParameters => "Missing payment parameters".to_string(),
            CheckoutError::MissingOrderId => "Missing order id".to_string(),
            CheckoutError::SignatureMismatch => "Payment verification failed".to_string(),
            CheckoutError::InvalidState { current, attempted } => {
                format!("Cannot move payment from {} to {}", current, attempted)
            }
            CheckoutError::PaymentNotCompleted { status } => {
                format!("Payment was not completed ({})", status)
            }
            CheckoutError::Gateway(_) | CheckoutError::Infrastructure(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// True for failures caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CheckoutError::MissingAmount
                | CheckoutError::InvalidAmount(_)
                | CheckoutError::MissingPaymentParameters
                | CheckoutError::MissingOrderId
                | CheckoutError::SignatureMismatch
        )
    }
}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutError::Gateway(detail) => write!(f, "Gateway error: {}", detail),
            CheckoutError::Infrastructure(detail) => write!(f, "Infrastructure error: {}", detail),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for CheckoutError {}

impl From<DomainError> for CheckoutError {
    fn from(err: DomainError) -> Self {
        CheckoutError::Infrastructure(err.to_string())
    }
}
