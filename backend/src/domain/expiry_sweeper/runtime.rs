//! Runtime dependency bundle for the expiry sweeper.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

/// Async sleeping abstraction so tests can drive the sweep loop.
#[async_trait]
pub trait SweepSleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl SweepSleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Runtime helpers used by the sweep loop.
pub struct ExpirySweeperRuntime {
    /// Async sleep implementation.
    pub sleeper: Arc<dyn SweepSleeper>,
}

impl Default for ExpirySweeperRuntime {
    fn default() -> Self {
        Self {
            sleeper: Arc::new(TokioSleeper),
        }
    }
}
