//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and backing stores.
//! They contain no business logic. The in-memory adapters back a single
//! process; swapping in database or Redis adapters is a matter of
//! implementing the same ports.

pub mod memory;
