//! In-memory TTL lease for single-process deployments.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{LeaseToken, SweeperLease, SweeperLeaseError};

struct LeaseRecord {
    token: LeaseToken,
    expires_at: Instant,
}

/// Named TTL leases held in process memory.
///
/// Expired leases are reclaimed lazily on the next acquisition attempt.
#[derive(Default)]
pub struct InMemorySweeperLease {
    leases: Mutex<HashMap<String, LeaseRecord>>,
}

impl InMemorySweeperLease {
    /// Build an empty lease table.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SweeperLease for InMemorySweeperLease {
    async fn try_acquire(
        &self,
        name: &str,
        ttl: Duration,
    ) -> Result<Option<LeaseToken>, SweeperLeaseError> {
        let mut leases = self.leases.lock().expect("lease table poisoned");
        let now = Instant::now();
        if leases
            .get(name)
            .is_some_and(|record| record.expires_at > now)
        {
            return Ok(None);
        }
        let token = LeaseToken::new(Uuid::new_v4().to_string());
        leases.insert(
            name.to_owned(),
            LeaseRecord {
                token: token.clone(),
                expires_at: now + ttl,
            },
        );
        Ok(Some(token))
    }

    async fn release(
        &self,
        name: &str,
        token: &LeaseToken,
    ) -> Result<(), SweeperLeaseError> {
        let mut leases = self.leases.lock().expect("lease table poisoned");
        if leases.get(name).is_some_and(|record| record.token == *token) {
            leases.remove(name);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn second_acquire_fails_while_lease_is_held() {
        let lease = InMemorySweeperLease::new();
        let ttl = Duration::from_secs(60);

        let token = lease
            .try_acquire("sweep", ttl)
            .await
            .expect("acquire succeeds")
            .expect("lease granted");
        let contended = lease.try_acquire("sweep", ttl).await.expect("acquire succeeds");
        assert!(contended.is_none());

        lease.release("sweep", &token).await.expect("release succeeds");
        let reacquired = lease.try_acquire("sweep", ttl).await.expect("acquire succeeds");
        assert!(reacquired.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn expired_lease_is_reclaimed() {
        let lease = InMemorySweeperLease::new();
        lease
            .try_acquire("sweep", Duration::from_millis(0))
            .await
            .expect("acquire succeeds")
            .expect("lease granted");

        let reclaimed = lease
            .try_acquire("sweep", Duration::from_secs(60))
            .await
            .expect("acquire succeeds");
        assert!(reclaimed.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn release_with_stale_token_is_a_no_op() {
        let lease = InMemorySweeperLease::new();
        let ttl = Duration::from_secs(60);
        let stale = LeaseToken::new("stale");

        let token = lease
            .try_acquire("sweep", ttl)
            .await
            .expect("acquire succeeds")
            .expect("lease granted");
        lease.release("sweep", &stale).await.expect("release succeeds");

        let contended = lease.try_acquire("sweep", ttl).await.expect("acquire succeeds");
        assert!(contended.is_none(), "current holder must keep the lease");

        lease.release("sweep", &token).await.expect("release succeeds");
    }
}
