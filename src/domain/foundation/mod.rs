//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, the state machine trait and the error
//! vocabulary shared by the checkout and admin domains.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::PaymentRecordId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
