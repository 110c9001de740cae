//! In-memory unit catalogue.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UnitRepository, UnitRepositoryError};
use crate::domain::{Unit, UnitFilter, UnitId};

/// Unit catalogue held in process memory, ordered by insertion.
#[derive(Default)]
pub struct InMemoryUnitRepository {
    units: Mutex<Vec<Unit>>,
}

impl InMemoryUnitRepository {
    /// Build an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UnitRepository for InMemoryUnitRepository {
    async fn save(&self, unit: &Unit) -> Result<(), UnitRepositoryError> {
        let mut units = self.units.lock().expect("unit store poisoned");
        if let Some(existing) = units.iter_mut().find(|candidate| candidate.id == unit.id) {
            *existing = unit.clone();
        } else {
            units.push(unit.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, unit_id: &UnitId) -> Result<Option<Unit>, UnitRepositoryError> {
        let units = self.units.lock().expect("unit store poisoned");
        Ok(units.iter().find(|unit| unit.id == *unit_id).cloned())
    }

    async fn count(&self) -> Result<u64, UnitRepositoryError> {
        let units = self.units.lock().expect("unit store poisoned");
        Ok(units.len() as u64)
    }

    async fn count_by_description(&self, description: &str) -> Result<u64, UnitRepositoryError> {
        let units = self.units.lock().expect("unit store poisoned");
        Ok(units
            .iter()
            .filter(|unit| unit.description.as_deref() == Some(description))
            .count() as u64)
    }

    async fn find_matching(&self, filter: &UnitFilter) -> Result<Vec<Unit>, UnitRepositoryError> {
        let units = self.units.lock().expect("unit store poisoned");
        Ok(units
            .iter()
            .filter(|unit| filter.matches(unit))
            .cloned()
            .collect())
    }
}
