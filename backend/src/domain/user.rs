//! User data model.
//!
//! Users are referenced by bookings and resolved at creation time. This
//! design only ever creates them through seeding.

use chrono::{DateTime, Utc};

use super::ids::UserId;

/// A registered user able to reserve units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identity.
    pub id: UserId,
    /// Human readable name.
    pub username: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
