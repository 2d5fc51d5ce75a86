//! Per-user serialization of toggle actions.
//!
//! Concurrent actions from the *same* user (rapid double-taps) must not race
//! on the working snapshot, but unrelated users should never wait on each
//! other — so one async mutex per user id, not a single global lock.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct UserLocks {
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `user_id`, creating it on first use.
    ///
    /// The map entry guard is dropped before awaiting, so the DashMap shard
    /// is never held across a suspension point.
    pub async fn acquire(&self, user_id: i64) -> OwnedMutexGuard<()> {
        let lock = Arc::clone(&self.locks.entry(user_id).or_default());
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_user_is_serialized() {
        let locks = Arc::new(UserLocks::new());
        let counter = Arc::new(std::sync::atomic::AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = Arc::clone(&locks);
            let counter = Arc::clone(&counter);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(1).await;
                // Non-atomic read/modify/write would lose updates without the lock.
                let v = counter.load(std::sync::atomic::Ordering::SeqCst);
                tokio::task::yield_now().await;
                counter.store(v + 1, std::sync::atomic::Ordering::SeqCst);
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(counter.load(std::sync::atomic::Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn different_users_do_not_block_each_other() {
        let locks = UserLocks::new();
        let _a = locks.acquire(1).await;
        // Would deadlock if the lock were global.
        let _b = locks.acquire(2).await;
    }
}
