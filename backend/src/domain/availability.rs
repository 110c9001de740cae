//! Availability index service.
//!
//! Wraps the day-keyed index behind range-oriented operations and owns the
//! rebuild protocol that re-derives the index from the booking ledger. The
//! ledger is authoritative; the index only exists to answer availability
//! queries without scanning bookings.

use std::sync::Arc;

use tracing::info;

use super::ports::{AvailabilityStore, BookingRepository, UnitRepository};
use super::{DateRange, DomainError, UnitId};

/// Range-oriented facade over the availability index.
#[derive(Clone)]
pub struct AvailabilityService {
    index: Arc<dyn AvailabilityStore>,
    bookings: Arc<dyn BookingRepository>,
    units: Arc<dyn UnitRepository>,
}

impl AvailabilityService {
    /// Build the service over its driven ports.
    pub fn new(
        index: Arc<dyn AvailabilityStore>,
        bookings: Arc<dyn BookingRepository>,
        units: Arc<dyn UnitRepository>,
    ) -> Self {
        Self {
            index,
            bookings,
            units,
        }
    }

    /// Mark `unit_id` unavailable on every day of `range`.
    ///
    /// Callers must hold the unit's creation lock when the reservation
    /// follows an availability check; the check and the reservation are
    /// only atomic under that lock.
    pub async fn reserve(&self, unit_id: UnitId, range: DateRange) -> Result<(), DomainError> {
        for day in range.days() {
            self.index.add_unit(day, unit_id).await?;
        }
        Ok(())
    }

    /// Make `unit_id` available again on every day of `range`.
    pub async fn release(&self, unit_id: UnitId, range: DateRange) -> Result<(), DomainError> {
        for day in range.days() {
            self.index.remove_unit(day, unit_id).await?;
        }
        Ok(())
    }

    /// Whether `unit_id` is free on every day of `range`.
    ///
    /// One membership hit anywhere in the range makes the whole range
    /// unavailable; there is no partial availability.
    pub async fn is_available(&self, unit_id: UnitId, range: DateRange) -> Result<bool, DomainError> {
        for day in range.days() {
            if self.index.contains_unit(day, unit_id).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Number of units free on every day of `range`.
    ///
    /// Computed as known units minus the union of day sets, so a unit
    /// booked on several days of the range is excluded exactly once.
    /// Returns zero while the index is uninitialised.
    pub async fn count_available(&self, range: DateRange) -> Result<u64, DomainError> {
        if !self.index.is_initialised().await? {
            return Ok(0);
        }
        let known = self.index.known_unit_count().await?;
        let days: Vec<_> = range.days().collect();
        let booked = self.index.booked_units(&days).await?;
        Ok(known.saturating_sub(booked.len() as u64))
    }

    /// Record a newly catalogued unit in the known-unit counter.
    pub async fn register_unit(&self) -> Result<(), DomainError> {
        self.index.increment_known_unit_count().await?;
        Ok(())
    }

    /// Re-derive the index from the ledger's active bookings.
    ///
    /// Idempotent and safe to call repeatedly. An already initialised
    /// index is left untouched unless `force` is set.
    pub async fn rebuild(&self, force: bool) -> Result<(), DomainError> {
        if self.index.is_initialised().await? && !force {
            info!("availability index is already initialised");
            return Ok(());
        }

        info!("rebuilding availability index from the booking ledger");
        self.index.clear().await?;

        let ranges = self.bookings.list_active_ranges().await?;
        let processed = ranges.len();
        for (unit_id, range) in ranges {
            for day in range.days() {
                self.index.add_unit(day, unit_id).await?;
            }
        }

        let unit_count = self.units.count().await?;
        self.index.set_known_unit_count(unit_count).await?;

        info!(
            active_bookings = processed,
            units = unit_count,
            "availability index rebuild completed",
        );
        Ok(())
    }
}
