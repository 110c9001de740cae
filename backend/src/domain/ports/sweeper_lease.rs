//! Port for the cross-instance sweeper lease.
//!
//! At most one service instance runs a named sweep at a time. The lease
//! carries a TTL so a crashed holder cannot block the sweep forever.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by lease adapters.
    pub enum SweeperLeaseError {
        /// Lease backend is unavailable or timing out.
        Backend { message: String } =>
            backend, "sweeper lease backend failure: {message}",
    }
}

/// Opaque proof of lease ownership; required to release early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaseToken(String);

impl LeaseToken {
    /// Wrap an adapter-issued token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw token value.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LeaseToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port for acquiring and releasing named TTL leases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SweeperLease: Send + Sync {
    /// Try to take the lease named `name` for at most `ttl`.
    ///
    /// Returns `None` when another holder currently owns it.
    async fn try_acquire(
        &self,
        name: &str,
        ttl: Duration,
    ) -> Result<Option<LeaseToken>, SweeperLeaseError>;

    /// Release the lease early. A no-op when `token` no longer owns it.
    async fn release(&self, name: &str, token: &LeaseToken)
    -> Result<(), SweeperLeaseError>;
}
