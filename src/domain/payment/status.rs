//! Payment status state machine.
//!
//! Mirrors the gateway's payment lifecycle plus a `Cancelled` state for
//! checkouts the buyer abandoned before any payment existed.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a stored payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Buyer authorized the payment; funds not yet captured.
    Authorized,

    /// Funds captured. Counts toward revenue.
    Captured,

    /// Gateway reported the attempt as failed.
    Failed,

    /// Buyer closed the payment widget before paying.
    Cancelled,

    /// Captured funds returned to the buyer.
    Refunded,
}

impl PaymentStatus {
    /// Maps a gateway payment status string.
    ///
    /// `created` is the gateway's pre-authorization state and is treated as
    /// pending authorization. Unknown values yield `None`.
    pub fn from_gateway(status: &str) -> Option<Self> {
        match status {
            "created" | "authorized" => Some(PaymentStatus::Authorized),
            "captured" => Some(PaymentStatus::Captured),
            "failed" => Some(PaymentStatus::Failed),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }

    /// Stable lowercase name used in storage and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Authorized => "authorized",
            PaymentStatus::Captured => "captured",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Refunded => "refunded",
        }
    }

    /// Parses the stored name produced by [`PaymentStatus::as_str`].
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cancelled" => Some(PaymentStatus::Cancelled),
            "created" => None,
            other => Self::from_gateway(other),
        }
    }

    /// Whether the payment still awaits a final gateway outcome.
    pub fn is_pending(&self) -> bool {
        matches!(self, PaymentStatus::Authorized)
    }

    /// Failed or cancelled: no money has moved as far as we know.
    pub fn is_unpaid(&self) -> bool {
        matches!(self, PaymentStatus::Failed | PaymentStatus::Cancelled)
    }

    /// Whether a signed checkout callback should re-check the gateway.
    ///
    /// Unpaid records qualify because the widget can report a failed
    /// attempt before a retry on the same payment succeeds.
    pub fn needs_gateway_check(&self) -> bool {
        self.is_pending() || self.is_unpaid()
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            (Authorized, Captured)
                | (Authorized, Failed)
                | (Captured, Refunded)
                | (Failed, Authorized)
                | (Failed, Captured)
                | (Cancelled, Authorized)
                | (Cancelled, Captured)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Authorized => vec![Captured, Failed],
            Captured => vec![Refunded],
            Failed | Cancelled => vec![Authorized, Captured],
            Refunded => vec![],
        }
    }
}
