//! Rentable unit data model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::UnitId;

/// Closed set of accommodation categories a unit can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccommodationType {
    /// Self-contained flat.
    Flat,
    /// Whole house.
    Home,
    /// Single room.
    Room,
    /// Serviced apartment.
    Apartment,
}

impl AccommodationType {
    /// Every accommodation category, in declaration order.
    pub const ALL: [Self; 4] = [Self::Flat, Self::Home, Self::Room, Self::Apartment];
}

/// An inventory item a user can reserve.
///
/// ## Invariants
/// - `base_cost` is a non-negative fixed-point amount (per night).
/// - Units are never deleted in this design.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// Stable identity.
    pub id: UnitId,
    /// Number of rooms in the unit.
    pub number_of_rooms: u16,
    /// Accommodation category.
    pub accommodation_type: AccommodationType,
    /// Floor the unit is on.
    pub floor: u16,
    /// Base nightly cost before markup.
    pub base_cost: Decimal,
    /// Free-text description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Attributes required to create a new [`Unit`].
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDraft {
    /// Number of rooms in the unit.
    pub number_of_rooms: u16,
    /// Accommodation category.
    pub accommodation_type: AccommodationType,
    /// Floor the unit is on.
    pub floor: u16,
    /// Base nightly cost before markup.
    pub base_cost: Decimal,
    /// Free-text description.
    pub description: Option<String>,
}

/// Search criteria for the unit catalogue.
///
/// All filter fields are optional and combine conjunctively. The date range
/// is handled separately by the availability index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitFilter {
    /// Exact number of rooms.
    pub number_of_rooms: Option<u16>,
    /// Accommodation category.
    pub accommodation_type: Option<AccommodationType>,
    /// Exact floor.
    pub floor: Option<u16>,
    /// Minimum base cost, inclusive.
    pub min_cost: Option<Decimal>,
    /// Maximum base cost, inclusive.
    pub max_cost: Option<Decimal>,
}

impl UnitFilter {
    /// Whether `unit` satisfies every populated criterion.
    pub fn matches(&self, unit: &Unit) -> bool {
        if self
            .number_of_rooms
            .is_some_and(|rooms| unit.number_of_rooms != rooms)
        {
            return false;
        }
        if self
            .accommodation_type
            .is_some_and(|kind| unit.accommodation_type != kind)
        {
            return false;
        }
        if self.floor.is_some_and(|floor| unit.floor != floor) {
            return false;
        }
        if self.min_cost.is_some_and(|min| unit.base_cost < min) {
            return false;
        }
        if self.max_cost.is_some_and(|max| unit.base_cost > max) {
            return false;
        }
        true
    }
}
