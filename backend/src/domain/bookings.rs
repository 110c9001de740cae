//! Booking lifecycle service.
//!
//! Owns the booking state machine. Every transition updates the ledger and
//! the availability index as one logical unit: creation decides
//! availability under the unit's lock, and terminal transitions release the
//! reserved days only after the versioned ledger write succeeds.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;
use serde_json::json;
use tracing::warn;

use super::audit::UnitEventRecorder;
use super::ports::{
    BookingRepository, BookingRepositoryError, PaymentRepository, UnitRepository, UserRepository,
};
use super::unit_locks::UnitLockRegistry;
use super::{
    AvailabilityService, Booking, BookingId, BookingStatus, DateRange, DomainError, MarkupPolicy,
    Payment, PaymentId, PaymentStatus, UnitEvent, UnitEventType, UnitId, UserId,
};

/// Attributes required to create a new [`Booking`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingDraft {
    /// Unit to reserve.
    pub unit_id: UnitId,
    /// User making the reservation.
    pub user_id: UserId,
    /// Half-open range to reserve.
    pub date_range: DateRange,
}

/// Driven ports and collaborators of the [`BookingService`].
pub struct BookingPorts {
    /// Booking ledger.
    pub bookings: Arc<dyn BookingRepository>,
    /// Unit catalogue.
    pub units: Arc<dyn UnitRepository>,
    /// User store.
    pub users: Arc<dyn UserRepository>,
    /// Payment records.
    pub payments: Arc<dyn PaymentRepository>,
    /// Availability index facade.
    pub availability: AvailabilityService,
    /// Best-effort audit recorder.
    pub recorder: UnitEventRecorder,
    /// Wall clock.
    pub clock: Arc<dyn Clock>,
}

/// Service driving booking state transitions.
#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    units: Arc<dyn UnitRepository>,
    users: Arc<dyn UserRepository>,
    payments: Arc<dyn PaymentRepository>,
    availability: AvailabilityService,
    recorder: UnitEventRecorder,
    locks: Arc<UnitLockRegistry>,
    markup: MarkupPolicy,
    clock: Arc<dyn Clock>,
    payment_window: Duration,
}

impl BookingService {
    /// Build the service.
    ///
    /// `payment_window` is how long a pending booking may stay unpaid
    /// before it is eligible for expiry.
    pub fn new(ports: BookingPorts, markup: MarkupPolicy, payment_window: Duration) -> Self {
        Self {
            bookings: ports.bookings,
            units: ports.units,
            users: ports.users,
            payments: ports.payments,
            availability: ports.availability,
            recorder: ports.recorder,
            locks: Arc::new(UnitLockRegistry::new()),
            markup,
            clock: ports.clock,
            payment_window,
        }
    }

    /// Create a pending booking, reserving the unit's days.
    ///
    /// The availability check and the reservation happen under the unit's
    /// exclusive lock, so two concurrent requests for overlapping ranges on
    /// the same unit cannot both succeed.
    pub async fn create(&self, draft: BookingDraft) -> Result<Booking, DomainError> {
        let today = self.clock.utc().date_naive();
        if draft.date_range.check_in() < today {
            return Err(DomainError::invalid_request(
                "checkInDate must not be in the past",
            ));
        }
        if draft.date_range.check_out() <= today {
            return Err(DomainError::invalid_request(
                "checkOutDate must be in the future",
            ));
        }

        let unit = self
            .units
            .find_by_id(&draft.unit_id)
            .await?
            .ok_or_else(|| DomainError::not_found("unit not found"))?;
        self.users
            .find_by_id(&draft.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user not found"))?;

        let _guard = self.locks.lock(draft.unit_id).await;

        if !self
            .availability
            .is_available(draft.unit_id, draft.date_range)
            .await?
        {
            return Err(
                DomainError::conflict("unit is not available for the chosen dates")
                    .with_details(json!({ "unitId": draft.unit_id })),
            );
        }

        let now = self.clock.utc();
        let booking = Booking {
            id: BookingId::random(),
            unit_id: draft.unit_id,
            user_id: draft.user_id,
            date_range: draft.date_range,
            status: BookingStatus::Pending,
            total_cost: self.markup.apply(unit.base_cost),
            created_at: now,
            expires_at: Some(now + self.payment_window),
            version: 0,
        };

        // The reservation and the ledger write are one unit of work: the
        // days go into the index first, and a failed ledger insert (or a
        // partially applied reservation) releases them again before the
        // error surfaces. The ledger must never hold an active booking the
        // index does not know about.
        if let Err(err) = self
            .availability
            .reserve(booking.unit_id, booking.date_range)
            .await
        {
            self.unreserve(booking.unit_id, booking.date_range).await;
            return Err(err);
        }
        if let Err(err) = self.bookings.insert(&booking).await {
            self.unreserve(booking.unit_id, booking.date_range).await;
            return Err(err.into());
        }

        self.recorder
            .record(UnitEvent::for_booking(
                booking.unit_id,
                booking.id,
                UnitEventType::BookingCreated,
                format!(
                    "booked for {} to {}",
                    booking.date_range.check_in(),
                    booking.date_range.check_out(),
                ),
                now,
            ))
            .await;

        Ok(booking)
    }

    /// Roll a reservation back, logging instead of masking the original
    /// failure when the index is also unreachable.
    async fn unreserve(&self, unit_id: UnitId, range: DateRange) {
        if let Err(err) = self.availability.release(unit_id, range).await {
            warn!(
                unit_id = %unit_id,
                error = %err,
                "failed to roll back a reservation; the index over-reserves until the next rebuild",
            );
        }
    }

    /// Fetch a booking by id.
    pub async fn get(&self, booking_id: BookingId) -> Result<Booking, DomainError> {
        self.bookings
            .find_by_id(&booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("booking not found"))
    }

    /// Cancel a booking and release its days.
    ///
    /// Idempotent on terminal bookings: the stored record is returned
    /// unchanged with no ledger, index, or audit writes.
    pub async fn cancel(&self, booking_id: BookingId) -> Result<Booking, DomainError> {
        let mut booking = self.get(booking_id).await?;
        if booking.status.is_terminal() {
            return Ok(booking);
        }

        let expected = booking.version;
        booking.mark_cancelled();
        booking.version += 1;
        self.bookings.save_versioned(&booking, expected).await?;

        self.availability
            .release(booking.unit_id, booking.date_range)
            .await?;

        self.recorder
            .record(UnitEvent::for_booking(
                booking.unit_id,
                booking.id,
                UnitEventType::BookingCancelled,
                "booking cancelled by the user",
                self.clock.utc(),
            ))
            .await;

        Ok(booking)
    }

    /// Pay for a pending booking, confirming it.
    ///
    /// Returns the recorded charge. The expiry deadline is checked against
    /// the clock at read time; an expired booking is rejected even before
    /// the sweeper has marked it.
    pub async fn pay(&self, booking_id: BookingId) -> Result<Payment, DomainError> {
        let mut booking = self.get(booking_id).await?;
        if booking.status != BookingStatus::Pending {
            return Err(DomainError::conflict("only pending bookings can be paid")
                .with_details(json!({ "status": booking.status })));
        }

        let now = self.clock.utc();
        if booking.is_expired_at(now) {
            return Err(DomainError::conflict("booking has expired"));
        }

        let expected = booking.version;
        booking.mark_confirmed();
        booking.version += 1;
        self.bookings.save_versioned(&booking, expected).await?;

        let payment = Payment {
            id: PaymentId::random(),
            booking_id: booking.id,
            amount: booking.total_cost,
            status: PaymentStatus::Successful,
            created_at: now,
        };
        self.payments.save(&payment).await?;

        self.recorder
            .record(UnitEvent::for_booking(
                booking.unit_id,
                booking.id,
                UnitEventType::BookingConfirmed,
                format!("payment of {} captured", payment.amount),
                now,
            ))
            .await;

        Ok(payment)
    }

    /// Expire one overdue pending booking, releasing its days.
    ///
    /// Returns `Ok(None)` when the booking was transitioned concurrently;
    /// the caller treats that as already handled.
    pub(crate) async fn expire(&self, mut booking: Booking) -> Result<Option<Booking>, DomainError> {
        let expected = booking.version;
        booking.mark_expired();
        booking.version += 1;
        match self.bookings.save_versioned(&booking, expected).await {
            Ok(()) => {}
            Err(BookingRepositoryError::VersionConflict { .. }) => return Ok(None),
            Err(other) => return Err(other.into()),
        }

        self.availability
            .release(booking.unit_id, booking.date_range)
            .await?;

        self.recorder
            .record(UnitEvent::for_booking(
                booking.unit_id,
                booking.id,
                UnitEventType::BookingExpired,
                "pending booking expired unpaid",
                self.clock.utc(),
            ))
            .await;

        Ok(Some(booking))
    }

    /// Pending bookings whose deadline has passed.
    pub(crate) async fn overdue(&self) -> Result<Vec<Booking>, DomainError> {
        Ok(self.bookings.find_expired_pending(self.clock.utc()).await?)
    }
}
