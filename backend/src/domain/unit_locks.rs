//! Per-unit exclusive locks serialising availability checks.
//!
//! Creating a booking must check availability and reserve the index as one
//! critical section per unit. The registry hands out one async mutex per
//! unit id, created lazily and shared between concurrent callers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::UnitId;

/// Registry of lazily created per-unit async mutexes.
#[derive(Default)]
pub struct UnitLockRegistry {
    locks: Mutex<HashMap<UnitId, Arc<AsyncMutex<()>>>>,
}

impl UnitLockRegistry {
    /// Build an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the exclusive lock for `unit_id`, waiting if held.
    ///
    /// The returned guard is owned, so it can be held across await points
    /// for the duration of the critical section.
    pub async fn lock(&self, unit_id: UnitId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("lock registry poisoned");
            Arc::clone(locks.entry(unit_id).or_default())
        };
        lock.lock_owned().await
    }
}
