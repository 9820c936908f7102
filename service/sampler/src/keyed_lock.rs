use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Mutual exclusion scoped by key.
///
/// Entries are dropped again once no guard or waiter refers to them.
#[derive(Clone, Default)]
pub struct KeyedLock {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

/// Holds the lock of one key until dropped.
pub struct KeyedLockGuard {
    key: String,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KeyedLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &str) -> KeyedLockGuard {
        // Built before waiting, so a caller dropped mid-wait still prunes.
        let mut held = KeyedLockGuard {
            key: key.to_owned(),
            locks: self.locks.clone(),
            guard: None,
        };
        let mutex = self.locks.entry(key.to_owned()).or_default().clone();
        held.guard = Some(mutex.lock_owned().await);
        held
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Drop for KeyedLockGuard {
    fn drop(&mut self) {
        self.guard.take();
        // Only the map's own reference left: nobody holds or waits for it.
        self.locks.remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_key_is_exclusive() {
        let lock = KeyedLock::new();
        let inside = Arc::new(AtomicUsize::new(0));
        let handles = (0..8).map(|_| {
            let lock = lock.clone();
            let inside = inside.clone();
            tokio::spawn(async move {
                let _guard = lock.lock("data_A1B2C3D4").await;
                assert_eq!(inside.fetch_add(1, Ordering::SeqCst), 0);
                tokio::time::sleep(Duration::from_millis(5)).await;
                inside.fetch_sub(1, Ordering::SeqCst);
            })
        });
        for result in futures::future::join_all(handles).await {
            result.unwrap();
        }
        assert!(lock.is_empty());
    }

    #[tokio::test]
    async fn different_keys_do_not_block() {
        let lock = KeyedLock::new();
        let _first = lock.lock("log_a").await;
        let second = tokio::time::timeout(Duration::from_millis(100), lock.lock("log_b")).await;
        assert!(second.is_ok());
        assert_eq!(lock.len(), 2);
    }

    #[tokio::test]
    async fn abandoned_waiter_leaves_no_entry() {
        let lock = KeyedLock::new();
        let first = lock.lock("log_a").await;
        let mut waiter = Box::pin(lock.lock("log_a"));
        assert!(futures::poll!(&mut waiter).is_pending());

        drop(first);
        drop(waiter);
        assert!(lock.is_empty());
    }
}
