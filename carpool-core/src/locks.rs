use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Per-ride mutual-exclusion registry.
///
/// Every mutating operation acquires the lock of the ride it touches before
/// its read-check-write sequence, so seat accounting on one ride never
/// interleaves. Operations on different rides get different locks and never
/// contend. Entries are kept for the lifetime of the registry; ride records
/// are never deleted.
pub struct RideLocks {
    inner: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl RideLocks {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Acquire the lock for a ride, creating it on first use. The guard is
    /// owned so it can be held across awaits inside an operation.
    pub async fn acquire(&self, ride_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.entry(ride_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

impl Default for RideLocks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_ride_is_exclusive() {
        let locks = Arc::new(RideLocks::new());
        let ride_id = Uuid::new_v4();

        let guard = locks.acquire(ride_id).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(ride_id).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn different_rides_do_not_contend() {
        let locks = RideLocks::new();
        let _a = locks.acquire(Uuid::new_v4()).await;
        // Completes immediately while the first guard is still held.
        let _b = locks.acquire(Uuid::new_v4()).await;
    }

    #[tokio::test]
    async fn lock_is_reusable_after_release() {
        let locks = RideLocks::new();
        let ride_id = Uuid::new_v4();
        drop(locks.acquire(ride_id).await);
        drop(locks.acquire(ride_id).await);
    }
}
