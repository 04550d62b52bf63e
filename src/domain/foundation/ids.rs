//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a stored payment record.
///
/// Vendor identifiers (order id, payment id) are kept as plain strings on the
/// record; this id belongs to us and exists even for cancelled checkouts that
/// never produced a vendor payment id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentRecordId(Uuid);

impl PaymentRecordId {
    /// Creates a new random PaymentRecordId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PaymentRecordId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PaymentRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PaymentRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PaymentRecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(PaymentRecordId::new(), PaymentRecordId::new());
    }

    #[test]
    fn parses_from_display_output() {
        let id = PaymentRecordId::new();
        let parsed: PaymentRecordId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_non_uuid_strings() {
        assert!("pay_29QQoUBi66xm2f".parse::<PaymentRecordId>().is_err());
    }

    #[test]
    fn serializes_as_bare_uuid_string() {
        let uuid = Uuid::parse_str("6f1c2b4e-6a0e-4b59-9a57-1f2a0c3d4e5f").unwrap();
        let json = serde_json::to_string(&PaymentRecordId::from_uuid(uuid)).unwrap();
        assert_eq!(json, "\"6f1c2b4e-6a0e-4b59-9a57-1f2a0c3d4e5f\"");
    }
}
