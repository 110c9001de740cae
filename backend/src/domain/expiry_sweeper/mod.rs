//! Recurring sweep that expires overdue pending bookings.
//!
//! The sweeper reconciles the ledger and the availability index: any
//! pending booking whose payment deadline has passed is marked expired and
//! its reserved days are released. Across service instances a named TTL
//! lease keeps at most one sweep running at a time.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::BookingService;
use super::DomainError;
use super::ports::SweeperLease;

mod runtime;

pub use runtime::{ExpirySweeperRuntime, SweepSleeper, TokioSleeper};

/// Sweeper configuration controlling cadence and lease bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpirySweeperConfig {
    /// Name of the cross-instance lease guarding the sweep.
    pub lease_name: String,
    /// Pause between sweep attempts.
    pub interval: Duration,
    /// Lease TTL; a single sweep is also bounded by this duration.
    pub lease_ttl: Duration,
}

impl Default for ExpirySweeperConfig {
    fn default() -> Self {
        Self {
            lease_name: "booking-expiry-sweep".to_owned(),
            interval: Duration::from_secs(60),
            lease_ttl: Duration::from_secs(600),
        }
    }
}

/// Counters describing one completed sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Bookings transitioned to expired.
    pub expired: usize,
    /// Bookings already transitioned by a concurrent actor.
    pub skipped: usize,
    /// Bookings whose transition failed; retried on the next sweep.
    pub failed: usize,
}

/// Result of a single sweep attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepRun {
    /// The sweep ran to completion.
    Completed(SweepOutcome),
    /// Another instance holds the lease.
    Skipped,
    /// The sweep exceeded the lease TTL and was cut short.
    TimedOut,
}

/// Recurring expiry sweep over the booking ledger.
pub struct ExpirySweeper {
    service: BookingService,
    lease: Arc<dyn SweeperLease>,
    sleeper: Arc<dyn SweepSleeper>,
    config: ExpirySweeperConfig,
}

impl ExpirySweeper {
    /// Build the sweeper.
    pub fn new(
        service: BookingService,
        lease: Arc<dyn SweeperLease>,
        runtime: ExpirySweeperRuntime,
        config: ExpirySweeperConfig,
    ) -> Self {
        Self {
            service,
            lease,
            sleeper: runtime.sleeper,
            config,
        }
    }

    /// Attempt one sweep under the lease.
    pub async fn run_once(&self) -> Result<SweepRun, DomainError> {
        let Some(token) = self
            .lease
            .try_acquire(&self.config.lease_name, self.config.lease_ttl)
            .await
            .map_err(|err| DomainError::service_unavailable(err.to_string()))?
        else {
            return Ok(SweepRun::Skipped);
        };

        let result = tokio::time::timeout(self.config.lease_ttl, self.sweep()).await;

        if let Err(err) = self.lease.release(&self.config.lease_name, &token).await {
            warn!(error = %err, "failed to release sweeper lease");
        }

        match result {
            Ok(outcome) => Ok(SweepRun::Completed(outcome?)),
            Err(_) => {
                warn!(
                    ttl_secs = self.config.lease_ttl.as_secs(),
                    "expiry sweep exceeded the lease ttl and was cut short",
                );
                Ok(SweepRun::TimedOut)
            }
        }
    }

    /// Sweep forever at the configured cadence.
    ///
    /// Failures are logged and retried on the next tick; the loop never
    /// exits.
    pub async fn run(&self) {
        loop {
            match self.run_once().await {
                Ok(SweepRun::Completed(outcome)) => {
                    if outcome != SweepOutcome::default() {
                        info!(
                            expired = outcome.expired,
                            skipped = outcome.skipped,
                            failed = outcome.failed,
                            "expiry sweep completed",
                        );
                    }
                }
                Ok(SweepRun::Skipped | SweepRun::TimedOut) => {}
                Err(err) => {
                    warn!(error = %err, "expiry sweep failed");
                }
            }
            self.sleeper.sleep(self.config.interval).await;
        }
    }

    async fn sweep(&self) -> Result<SweepOutcome, DomainError> {
        let overdue = self.service.overdue().await?;
        let mut outcome = SweepOutcome::default();

        for booking in overdue {
            let booking_id = booking.id;
            match self.service.expire(booking).await {
                Ok(Some(_)) => outcome.expired += 1,
                Ok(None) => outcome.skipped += 1,
                // One stuck booking must not block the rest of the sweep.
                Err(err) => {
                    outcome.failed += 1;
                    warn!(booking_id = %booking_id, error = %err, "failed to expire booking");
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests;
