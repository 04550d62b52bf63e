//! Major/minor currency unit conversion.
//!
//! Checkout amounts arrive in major units (rupees) and the gateway expects
//! integer minor units (paise). Conversion is done in decimal arithmetic so
//! that `19.995` becomes `2000`, not the `1999` a binary float would give.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Minor units per major unit for every currency this store sells in.
const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Reasons an amount cannot be used for an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount is required")]
    Missing,

    #[error("Amount must be a number, got '{0}'")]
    NotANumber(String),

    #[error("Amount must be positive")]
    NotPositive,

    #[error("Amount is too large")]
    TooLarge,
}

/// A positive amount in major currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MajorAmount(Decimal);

impl MajorAmount {
    /// Parses a decimal string such as `"10"` or `"19.995"`.
    ///
    /// Blank input and zero are both reported as [`AmountError::Missing`];
    /// checkout clients send `0` when no amount was chosen.
    pub fn parse(raw: &str) -> Result<Self, AmountError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Missing);
        }
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| AmountError::NotANumber(trimmed.to_string()))?;
        Self::from_decimal(value)
    }

    /// Wraps an already-parsed decimal.
    pub fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        if value.is_zero() {
            return Err(AmountError::Missing);
        }
        if value.is_sign_negative() {
            return Err(AmountError::NotPositive);
        }
        Ok(Self(value))
    }

    /// The amount in major units.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Converts to integer minor units, rounding half away from zero.
    pub fn to_minor_units(&self) -> Result<i64, AmountError> {
        let scaled = self
            .0
            .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
            .ok_or(AmountError::TooLarge)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        let minor = scaled.to_i64().ok_or(AmountError::TooLarge)?;
        if minor <= 0 {
            return Err(AmountError::NotPositive);
        }
        Ok(minor)
    }
}

/// Converts stored minor units back to major units (`1999` -> `19.99`).
pub fn minor_to_major(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}
