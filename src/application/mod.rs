//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (checkout, admin login) are kept apart from the read-only
//! admin queries.

pub mod handlers;
