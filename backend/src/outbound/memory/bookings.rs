//! In-memory booking ledger with versioned saves.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingId, DateRange, UnitId};

/// Booking ledger held in process memory.
///
/// `save_versioned` compares against the stored record's version under the
/// store lock, giving the same serialisation a database row version column
/// would.
#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: Mutex<HashMap<BookingId, Booking>>,
}

impl InMemoryBookingRepository {
    /// Build an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut bookings = self.bookings.lock().expect("booking store poisoned");
        if bookings.contains_key(&booking.id) {
            return Err(BookingRepositoryError::query(format!(
                "booking {} already exists",
                booking.id
            )));
        }
        bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        booking_id: &BookingId,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let bookings = self.bookings.lock().expect("booking store poisoned");
        Ok(bookings.get(booking_id).cloned())
    }

    async fn save_versioned(
        &self,
        booking: &Booking,
        expected_version: u64,
    ) -> Result<(), BookingRepositoryError> {
        let mut bookings = self.bookings.lock().expect("booking store poisoned");
        let stored = bookings
            .get_mut(&booking.id)
            .ok_or_else(|| BookingRepositoryError::query(format!("booking {} not found", booking.id)))?;
        if stored.version != expected_version {
            return Err(BookingRepositoryError::version_conflict(
                booking.id.to_string(),
            ));
        }
        *stored = booking.clone();
        Ok(())
    }

    async fn list_active_ranges(
        &self,
    ) -> Result<Vec<(UnitId, DateRange)>, BookingRepositoryError> {
        let bookings = self.bookings.lock().expect("booking store poisoned");
        Ok(bookings
            .values()
            .filter(|booking| booking.status.is_active())
            .map(|booking| (booking.unit_id, booking.date_range))
            .collect())
    }

    async fn find_expired_pending(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let bookings = self.bookings.lock().expect("booking store poisoned");
        Ok(bookings
            .values()
            .filter(|booking| booking.is_expired_at(now))
            .cloned()
            .collect())
    }
}
