//! In-memory availability index.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::UnitId;
use crate::domain::ports::{AvailabilityStore, AvailabilityStoreError};

#[derive(Default)]
struct IndexState {
    days: HashMap<NaiveDate, HashSet<UnitId>>,
    known_units: u64,
    initialised: bool,
}

/// Day-keyed availability index held in process memory.
#[derive(Default)]
pub struct InMemoryAvailabilityStore {
    state: Mutex<IndexState>,
}

impl InMemoryAvailabilityStore {
    /// Build an empty, uninitialised index.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AvailabilityStore for InMemoryAvailabilityStore {
    async fn add_unit(
        &self,
        day: NaiveDate,
        unit_id: UnitId,
    ) -> Result<(), AvailabilityStoreError> {
        let mut state = self.state.lock().expect("index poisoned");
        state.days.entry(day).or_default().insert(unit_id);
        Ok(())
    }

    async fn remove_unit(
        &self,
        day: NaiveDate,
        unit_id: UnitId,
    ) -> Result<(), AvailabilityStoreError> {
        let mut state = self.state.lock().expect("index poisoned");
        if let Some(units) = state.days.get_mut(&day) {
            units.remove(&unit_id);
            if units.is_empty() {
                state.days.remove(&day);
            }
        }
        Ok(())
    }

    async fn contains_unit(
        &self,
        day: NaiveDate,
        unit_id: UnitId,
    ) -> Result<bool, AvailabilityStoreError> {
        let state = self.state.lock().expect("index poisoned");
        Ok(state
            .days
            .get(&day)
            .is_some_and(|units| units.contains(&unit_id)))
    }

    async fn booked_units(
        &self,
        days: &[NaiveDate],
    ) -> Result<HashSet<UnitId>, AvailabilityStoreError> {
        let state = self.state.lock().expect("index poisoned");
        let mut union = HashSet::new();
        for day in days {
            if let Some(units) = state.days.get(day) {
                union.extend(units.iter().copied());
            }
        }
        Ok(union)
    }

    async fn known_unit_count(&self) -> Result<u64, AvailabilityStoreError> {
        let state = self.state.lock().expect("index poisoned");
        Ok(state.known_units)
    }

    async fn set_known_unit_count(&self, count: u64) -> Result<(), AvailabilityStoreError> {
        let mut state = self.state.lock().expect("index poisoned");
        state.known_units = count;
        state.initialised = true;
        Ok(())
    }

    async fn increment_known_unit_count(&self) -> Result<(), AvailabilityStoreError> {
        let mut state = self.state.lock().expect("index poisoned");
        state.known_units += 1;
        Ok(())
    }

    async fn is_initialised(&self) -> Result<bool, AvailabilityStoreError> {
        let state = self.state.lock().expect("index poisoned");
        Ok(state.initialised)
    }

    async fn clear(&self) -> Result<(), AvailabilityStoreError> {
        let mut state = self.state.lock().expect("index poisoned");
        *state = IndexState::default();
        Ok(())
    }
}
