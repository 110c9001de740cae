//! Port for the booking ledger.
//!
//! The ledger is the source of truth for reservations; the availability
//! index is a cache derived from it. Mutations are versioned so concurrent
//! transitions against the same booking serialise instead of clobbering
//! each other.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Booking, BookingId, DateRange, DomainError, UnitId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking ledger adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            connection, "booking ledger connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            query, "booking ledger query failed: {message}",
        /// A versioned save raced a concurrent transition and lost.
        VersionConflict { booking_id: String } =>
            version_conflict, "booking {booking_id} was modified concurrently",
    }
}

impl From<BookingRepositoryError> for DomainError {
    fn from(err: BookingRepositoryError) -> Self {
        match err {
            BookingRepositoryError::VersionConflict { .. } => {
                DomainError::conflict("booking was modified concurrently, please retry")
            }
            other => DomainError::service_unavailable(other.to_string()),
        }
    }
}

/// Port for writing and reading bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Append a new booking to the ledger.
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Find a booking by id.
    async fn find_by_id(
        &self,
        booking_id: &BookingId,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Persist a transition, failing with `VersionConflict` unless the
    /// stored version still equals `expected_version`.
    async fn save_versioned(
        &self,
        booking: &Booking,
        expected_version: u64,
    ) -> Result<(), BookingRepositoryError>;

    /// Reserved ranges of every active booking, for index rebuilds.
    async fn list_active_ranges(&self)
    -> Result<Vec<(UnitId, DateRange)>, BookingRepositoryError>;

    /// Pending bookings whose deadline has passed at `now`.
    async fn find_expired_pending(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>, BookingRepositoryError>;
}
