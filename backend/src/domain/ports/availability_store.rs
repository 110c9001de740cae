//! Port for the per-day availability index.
//!
//! The index is a derived cache over the booking ledger: one set of
//! unavailable unit ids per calendar day, plus a counter of units the index
//! knows about. It can always be rebuilt from the ledger.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{DomainError, UnitId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by availability index adapters.
    pub enum AvailabilityStoreError {
        /// Index backend is unavailable or timing out.
        Backend { message: String } =>
            backend, "availability index backend failure: {message}",
    }
}

impl From<AvailabilityStoreError> for DomainError {
    fn from(err: AvailabilityStoreError) -> Self {
        DomainError::service_unavailable(err.to_string())
    }
}

/// Port over the day-keyed availability index.
///
/// `set_known_unit_count` marks the index as initialised; [`clear`]
/// resets both the day sets and the initialised flag.
///
/// [`clear`]: AvailabilityStore::clear
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Mark `unit_id` unavailable on `day`.
    async fn add_unit(&self, day: NaiveDate, unit_id: UnitId)
    -> Result<(), AvailabilityStoreError>;

    /// Mark `unit_id` available again on `day`.
    async fn remove_unit(
        &self,
        day: NaiveDate,
        unit_id: UnitId,
    ) -> Result<(), AvailabilityStoreError>;

    /// Whether `unit_id` is unavailable on `day`.
    async fn contains_unit(
        &self,
        day: NaiveDate,
        unit_id: UnitId,
    ) -> Result<bool, AvailabilityStoreError>;

    /// Union of unavailable unit ids across `days`.
    async fn booked_units(
        &self,
        days: &[NaiveDate],
    ) -> Result<HashSet<UnitId>, AvailabilityStoreError>;

    /// Number of units the index knows about.
    async fn known_unit_count(&self) -> Result<u64, AvailabilityStoreError>;

    /// Overwrite the known-unit counter and mark the index initialised.
    async fn set_known_unit_count(&self, count: u64) -> Result<(), AvailabilityStoreError>;

    /// Bump the known-unit counter by one.
    async fn increment_known_unit_count(&self) -> Result<(), AvailabilityStoreError>;

    /// Whether the index has been populated since the last clear.
    async fn is_initialised(&self) -> Result<bool, AvailabilityStoreError>;

    /// Drop every day set and reset the counter and initialised flag.
    async fn clear(&self) -> Result<(), AvailabilityStoreError>;
}
