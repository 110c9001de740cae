//! Domain layer: booking lifecycle, availability index, and expiry sweep.
//!
//! Services in this module hold business rules only and reach
//! infrastructure through the traits in [`ports`]. The booking ledger is
//! the source of truth; the availability index is a derived cache kept
//! consistent by the lifecycle service and the sweeper.

mod audit;
mod availability;
mod booking;
mod bookings;
mod error;
mod events;
mod expiry_sweeper;
mod ids;
mod payment;
pub mod ports;
mod pricing;
mod seeding;
mod unit;
mod unit_locks;
mod user;
mod units;

pub use audit::UnitEventRecorder;
pub use availability::AvailabilityService;
pub use booking::{Booking, BookingStatus, DateRange, DateRangeValidationError};
pub use bookings::{BookingDraft, BookingPorts, BookingService};
pub use error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use events::{UnitEvent, UnitEventType};
pub use expiry_sweeper::{
    ExpirySweeper, ExpirySweeperConfig, ExpirySweeperRuntime, SweepOutcome, SweepRun, SweepSleeper,
    TokioSleeper,
};
pub use ids::{BookingId, PaymentId, UnitId, UserId};
pub use payment::{Payment, PaymentStatus};
pub use pricing::{MarkupPolicy, MarkupPolicyValidationError};
pub use seeding::{DataSeeder, GENERATED_UNIT_DESCRIPTION, SeedConfig, SeedOutcome};
pub use unit::{AccommodationType, Unit, UnitDraft, UnitFilter};
pub use unit_locks::UnitLockRegistry;
pub use user::User;
pub use units::{UnitSearch, UnitService};
