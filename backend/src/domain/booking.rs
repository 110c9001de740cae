//! Booking data model and state machine.
//!
//! A booking reserves one unit for a half-open date range `[check_in,
//! check_out)`. `PENDING` is the only non-terminal state apart from
//! `CONFIRMED`, which may still be cancelled; `CANCELLED` and `EXPIRED` are
//! terminal.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{BookingId, UnitId, UserId};

/// Lifecycle state of a [`Booking`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Awaiting payment; the only state with an expiry deadline.
    Pending,
    /// Paid. May still be cancelled.
    Confirmed,
    /// Cancelled by the user. Terminal.
    Cancelled,
    /// Auto-cancelled due to non-payment. Terminal.
    Expired,
}

impl BookingStatus {
    /// Statuses that occupy the availability index.
    pub const ACTIVE: [Self; 2] = [Self::Pending, Self::Confirmed];

    /// Whether the booking can never transition again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Expired)
    }

    /// Whether the booking occupies the availability index.
    pub fn is_active(self) -> bool {
        Self::ACTIVE.contains(&self)
    }
}

/// Validation errors returned when constructing a [`DateRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeValidationError {
    /// `check_out` is not strictly after `check_in`.
    NotChronological,
}

impl std::fmt::Display for DateRangeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotChronological => write!(f, "checkOutDate must be after checkInDate"),
        }
    }
}

impl std::error::Error for DateRangeValidationError {}

/// Half-open calendar range `[check_in, check_out)`.
///
/// The check-out day itself is never reserved.
///
/// # Examples
/// ```
/// use backend::domain::DateRange;
/// use chrono::NaiveDate;
///
/// let check_in = NaiveDate::from_ymd_opt(2025, 12, 20).expect("valid date");
/// let check_out = NaiveDate::from_ymd_opt(2025, 12, 25).expect("valid date");
/// let range = DateRange::try_new(check_in, check_out).expect("chronological");
/// assert_eq!(range.nights(), 5);
/// assert_eq!(range.days().count(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl DateRange {
    /// Construct a range, rejecting empty or inverted ranges.
    pub fn try_new(
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Self, DateRangeValidationError> {
        if check_in >= check_out {
            return Err(DateRangeValidationError::NotChronological);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// First reserved day.
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Day the unit becomes free again (excluded from the range).
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights covered by the range.
    pub fn nights(&self) -> i64 {
        self.check_out.signed_duration_since(self.check_in).num_days()
    }

    /// Every calendar day in `[check_in, check_out)`.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let check_out = self.check_out;
        self.check_in.iter_days().take_while(move |day| *day < check_out)
    }

    /// Whether two half-open ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }
}

/// A reservation of one unit by one user.
///
/// ## Invariants
/// - `expires_at` is `Some` if and only if `status` is `Pending`.
/// - `total_cost` is computed once at creation and immutable thereafter.
/// - `version` increases on every persisted mutation; the ledger rejects a
///   save made against a stale version.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    /// Stable identity.
    pub id: BookingId,
    /// Reserved unit.
    pub unit_id: UnitId,
    /// Reserving user.
    pub user_id: UserId,
    /// Half-open reserved range.
    pub date_range: DateRange,
    /// Lifecycle state.
    pub status: BookingStatus,
    /// Frozen total cost (base cost plus markup).
    pub total_cost: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Payment deadline; set only while `Pending`.
    pub expires_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency version.
    pub version: u64,
}

impl Booking {
    /// Move a pending booking to `Confirmed`, clearing the deadline.
    pub fn mark_confirmed(&mut self) {
        self.status = BookingStatus::Confirmed;
        self.expires_at = None;
    }

    /// Move the booking to `Cancelled`, clearing the deadline.
    pub fn mark_cancelled(&mut self) {
        self.status = BookingStatus::Cancelled;
        self.expires_at = None;
    }

    /// Move a pending booking to `Expired`, clearing the deadline.
    pub fn mark_expired(&mut self) {
        self.status = BookingStatus::Expired;
        self.expires_at = None;
    }

    /// Whether the payment deadline has passed at `now`.
    ///
    /// Authoritative at read time; callers must not wait for the sweeper.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|deadline| deadline < now)
    }
}
