//! Order creation request built from a checkout amount.

use crate::domain::foundation::Timestamp;

use super::errors::CheckoutError;
use super::money::MajorAmount;

/// Currency used when configuration does not override it.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Everything the gateway needs to open an order.
///
/// Orders are created with capture-on-authorization so a successful widget
/// callback settles the payment without a separate capture call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Amount in minor units (paise).
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Merchant-side receipt label, unique per checkout attempt.
    pub receipt: String,
    /// Capture automatically once the buyer authorizes.
    pub capture_on_authorization: bool,
}

impl OrderRequest {
    /// Builds the request for a checkout of `amount` major units.
    pub fn for_checkout(
        amount: MajorAmount,
        currency: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, CheckoutError> {
        let minor = amount
            .to_minor_units()
            .map_err(CheckoutError::invalid_amount)?;

        Ok(Self {
            amount: minor,
            currency: currency.into(),
            receipt: receipt_label(now),
            capture_on_authorization: true,
        })
    }
}

/// Time-based receipt label, `receipt_<unix millis>`.
fn receipt_label(now: Timestamp) -> String {
    format!("receipt_{}", now.as_unix_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_unix_secs(secs)
    }

    #[test]
    fn ten_rupees_becomes_one_thousand_paise_in_inr() {
        let amount = MajorAmount::parse("10").unwrap();
        let request = OrderRequest::for_checkout(amount, DEFAULT_CURRENCY, at(1_700_000_000)).unwrap();

        assert_eq!(request.amount, 1000);
        assert_eq!(request.currency, "INR");
        assert!(request.capture_on_authorization);
    }

    #[test]
    fn receipt_label_uses_millisecond_clock() {
        let amount = MajorAmount::parse("1").unwrap();
        let request = OrderRequest::for_checkout(amount, "INR", at(1_700_000_000)).unwrap();

        assert_eq!(request.receipt, "receipt_1700000000000");
    }

    #[test]
    fn amount_that_rounds_to_zero_is_rejected() {
        let amount = MajorAmount::parse("0.004").unwrap();
        let result = OrderRequest::for_checkout(amount, "INR", at(0));

        assert!(matches!(result, Err(CheckoutError::InvalidAmount(_))));
    }
}
