//! Audit events describing unit lifecycle changes.
//!
//! Events are an append-only trail. Recording is best effort: failures are
//! logged and never abort the operation that produced the event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::ids::{BookingId, UnitId};

/// Kind of change a [`UnitEvent`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitEventType {
    /// A unit entered the catalogue.
    UnitCreated,
    /// A unit left the catalogue.
    UnitDeleted,
    /// A booking reserved the unit.
    BookingCreated,
    /// A booking was paid and confirmed.
    BookingConfirmed,
    /// A booking was cancelled by the user.
    BookingCancelled,
    /// A pending booking lapsed without payment.
    BookingExpired,
}

/// One entry in the unit audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitEvent {
    /// Stable identity.
    pub id: Uuid,
    /// Unit the event concerns.
    pub unit_id: UnitId,
    /// Booking involved, when the event is booking-driven.
    pub booking_id: Option<BookingId>,
    /// Kind of change recorded.
    pub event_type: UnitEventType,
    /// Free-text description of what happened.
    pub details: String,
    /// When the change happened.
    pub occurred_at: DateTime<Utc>,
}

impl UnitEvent {
    /// Build an event about the unit itself.
    pub fn for_unit(
        unit_id: UnitId,
        event_type: UnitEventType,
        details: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            unit_id,
            booking_id: None,
            event_type,
            details: details.into(),
            occurred_at,
        }
    }

    /// Build an event driven by a booking transition.
    pub fn for_booking(
        unit_id: UnitId,
        booking_id: BookingId,
        event_type: UnitEventType,
        details: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            unit_id,
            booking_id: Some(booking_id),
            event_type,
            details: details.into(),
            occurred_at,
        }
    }
}
