//! Payment records emitted when a booking is paid.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{BookingId, PaymentId};

/// Outcome of a payment attempt.
///
/// The emulated processor always succeeds, so only the successful variant is
/// ever recorded today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Funds captured.
    Successful,
    /// Processor rejected the payment.
    Failed,
}

/// A settled charge against a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    /// Stable identity.
    pub id: PaymentId,
    /// Booking the charge settles.
    pub booking_id: BookingId,
    /// Amount charged; always the booking's frozen total cost.
    pub amount: Decimal,
    /// Outcome reported by the processor.
    pub status: PaymentStatus,
    /// When the charge was recorded.
    pub created_at: DateTime<Utc>,
}
