//! In-memory unit audit trail.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::UnitEvent;
use crate::domain::ports::{UnitEventRepository, UnitEventRepositoryError};

/// Append-only audit trail held in process memory.
#[derive(Default)]
pub struct InMemoryUnitEventRepository {
    events: Mutex<Vec<UnitEvent>>,
}

impl InMemoryUnitEventRepository {
    /// Build an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded event, in insertion order.
    pub fn recorded(&self) -> Vec<UnitEvent> {
        self.events.lock().expect("event store poisoned").clone()
    }
}

#[async_trait]
impl UnitEventRepository for InMemoryUnitEventRepository {
    async fn save(&self, event: &UnitEvent) -> Result<(), UnitEventRepositoryError> {
        let mut events = self.events.lock().expect("event store poisoned");
        events.push(event.clone());
        Ok(())
    }
}
