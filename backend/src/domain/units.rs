//! Unit catalogue service.

use std::sync::Arc;

use mockable::Clock;

use super::audit::UnitEventRecorder;
use super::ports::{BookingRepository, UnitRepository};
use super::{
    AvailabilityService, DateRange, DomainError, Unit, UnitDraft, UnitEvent, UnitEventType,
    UnitFilter, UnitId,
};

/// Search parameters for available units.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSearch {
    /// Attribute criteria; all optional, combined conjunctively.
    pub filter: UnitFilter,
    /// Desired stay; units with an overlapping active booking are excluded.
    pub date_range: DateRange,
    /// Number of matches to skip.
    pub offset: u64,
    /// Maximum number of matches to return.
    pub limit: u64,
}

/// Service owning the unit catalogue.
#[derive(Clone)]
pub struct UnitService {
    units: Arc<dyn UnitRepository>,
    bookings: Arc<dyn BookingRepository>,
    availability: AvailabilityService,
    recorder: UnitEventRecorder,
    clock: Arc<dyn Clock>,
}

impl UnitService {
    /// Build the service.
    pub fn new(
        units: Arc<dyn UnitRepository>,
        bookings: Arc<dyn BookingRepository>,
        availability: AvailabilityService,
        recorder: UnitEventRecorder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            units,
            bookings,
            availability,
            recorder,
            clock,
        }
    }

    /// Add a unit to the catalogue.
    pub async fn create(&self, draft: UnitDraft) -> Result<Unit, DomainError> {
        if draft.base_cost.is_sign_negative() {
            return Err(DomainError::invalid_request("baseCost must not be negative"));
        }

        let now = self.clock.utc();
        let unit = Unit {
            id: UnitId::random(),
            number_of_rooms: draft.number_of_rooms,
            accommodation_type: draft.accommodation_type,
            floor: draft.floor,
            base_cost: draft.base_cost,
            description: draft.description,
            created_at: now,
        };
        self.units.save(&unit).await?;

        self.recorder
            .record(UnitEvent::for_unit(
                unit.id,
                UnitEventType::UnitCreated,
                "unit added to the catalogue",
                now,
            ))
            .await;
        self.availability.register_unit().await?;

        Ok(unit)
    }

    /// Fetch a unit by id.
    pub async fn get(&self, unit_id: UnitId) -> Result<Unit, DomainError> {
        self.units
            .find_by_id(&unit_id)
            .await?
            .ok_or_else(|| DomainError::not_found("unit not found"))
    }

    /// Units matching the criteria that are free for the requested stay.
    ///
    /// Availability is decided against the ledger's active bookings, not
    /// the index, so search results stay correct even mid-rebuild.
    pub async fn search(&self, search: UnitSearch) -> Result<Vec<Unit>, DomainError> {
        if let (Some(min), Some(max)) = (search.filter.min_cost, search.filter.max_cost)
            && min > max
        {
            return Err(DomainError::invalid_request(
                "minCost must be less than or equal to maxCost",
            ));
        }

        let candidates = self.units.find_matching(&search.filter).await?;
        let active_ranges = self.bookings.list_active_ranges().await?;

        let results = candidates
            .into_iter()
            .filter(|unit| {
                !active_ranges
                    .iter()
                    .any(|(unit_id, range)| *unit_id == unit.id && range.overlaps(&search.date_range))
            })
            .skip(search.offset as usize)
            .take(search.limit as usize)
            .collect();
        Ok(results)
    }
}
