//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without I/O.

use crate::domain::{AvailabilityService, BookingService, MarkupPolicy, UnitService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Unit catalogue service.
    pub units: UnitService,
    /// Booking lifecycle service.
    pub bookings: BookingService,
    /// Availability index facade.
    pub availability: AvailabilityService,
    /// Markup applied to quoted unit costs.
    pub markup: MarkupPolicy,
}
