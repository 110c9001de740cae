//! Best-effort recording of unit audit events.
//!
//! Audit writes never abort the operation that produced them. This is the
//! only boundary in the domain where errors are swallowed; everywhere else
//! they propagate.

use std::sync::Arc;

use tracing::warn;

use super::UnitEvent;
use super::ports::UnitEventRepository;

/// Records audit events, logging failures instead of surfacing them.
#[derive(Clone)]
pub struct UnitEventRecorder {
    events: Arc<dyn UnitEventRepository>,
}

impl UnitEventRecorder {
    /// Build a recorder over the audit trail port.
    pub fn new(events: Arc<dyn UnitEventRepository>) -> Self {
        Self { events }
    }

    /// Append `event`, logging and discarding any failure.
    pub async fn record(&self, event: UnitEvent) {
        if let Err(err) = self.events.save(&event).await {
            warn!(
                unit_id = %event.unit_id,
                event_type = ?event.event_type,
                error = %err,
                "failed to record unit event",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MockUnitEventRepository, UnitEventRepositoryError};
    use crate::domain::{UnitEventType, UnitId};

    #[rstest]
    #[tokio::test]
    async fn record_swallows_repository_failures() {
        let mut events = MockUnitEventRepository::new();
        events
            .expect_save()
            .returning(|_| Err(UnitEventRepositoryError::query("disk full")));
        let recorder = UnitEventRecorder::new(Arc::new(events));

        recorder
            .record(UnitEvent::for_unit(
                UnitId::random(),
                UnitEventType::UnitCreated,
                "unit added to the catalogue",
                Utc::now(),
            ))
            .await;
    }

    #[rstest]
    #[tokio::test]
    async fn record_persists_the_event() {
        let mut events = MockUnitEventRepository::new();
        events
            .expect_save()
            .withf(|event| event.event_type == UnitEventType::UnitCreated)
            .times(1)
            .returning(|_| Ok(()));
        let recorder = UnitEventRecorder::new(Arc::new(events));

        recorder
            .record(UnitEvent::for_unit(
                UnitId::random(),
                UnitEventType::UnitCreated,
                "unit added to the catalogue",
                Utc::now(),
            ))
            .await;
    }
}
