//! Booking lifecycle and availability backend.
//!
//! The crate is organised hexagonally:
//!
//! - [`domain`] owns the booking state machine, the availability index
//!   protocol, pricing, seeding, and the expiry sweeper, all behind ports.
//! - [`inbound`] adapts HTTP requests onto the domain services.
//! - [`outbound`] provides the in-memory adapters backing the ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
