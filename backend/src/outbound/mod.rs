//! Outbound adapters implementing domain ports for infrastructure.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod persistence;
