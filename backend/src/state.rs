//! Shared application state

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::config::AppConfig;
use crate::repositories::{DiaryRepository, KeyValueStore, ProfileRepository};

/// Per-date locks serializing diary read-modify-write cycles.
///
/// The store has no transactions, so two concurrent mutations of the
/// same date would otherwise race and drop one write. Idle entries are
/// evicted on the next acquire, so the map tracks dates with writers in
/// flight rather than every date ever touched.
#[derive(Clone, Default)]
pub struct DateLocks {
    inner: Arc<Mutex<HashMap<NaiveDate, Arc<Mutex<()>>>>>,
}

impl DateLocks {
    /// Acquire the lock for one date, creating it on first use
    pub async fn acquire(&self, date: NaiveDate) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            // a strong count of 1 means only the map holds the lock:
            // no guard outstanding, no other acquire in progress
            map.retain(|d, lock| *d == date || Arc::strong_count(lock) > 1);
            map.entry(date).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    async fn tracked_dates(&self) -> usize {
        self.inner.lock().await.len()
    }
}

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub diary: DiaryRepository,
    pub profiles: ProfileRepository,
    pub date_locks: DateLocks,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            config: Arc::new(config),
            diary: DiaryRepository::new(store.clone()),
            profiles: ProfileRepository::new(store),
            date_locks: DateLocks::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;

    #[tokio::test]
    async fn test_date_locks_are_per_date() {
        let locks = DateLocks::default();
        let a = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        // holding one date's lock must not block another date
        let _guard_a = locks.acquire(a).await;
        let _guard_b = locks.acquire(b).await;
    }

    #[tokio::test]
    async fn test_idle_date_locks_are_evicted() {
        let locks = DateLocks::default();
        let a = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        // a released date is dropped on the next acquire
        drop(locks.acquire(a).await);
        let _guard_b = locks.acquire(b).await;
        assert_eq!(locks.tracked_dates().await, 1);

        // a date with a guard outstanding survives other acquires
        let c = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let _guard_c = locks.acquire(c).await;
        assert_eq!(locks.tracked_dates().await, 2);
    }

    #[tokio::test]
    async fn test_held_lock_is_not_evicted_and_still_serializes() {
        let locks = DateLocks::default();
        let a = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let guard_a = locks.acquire(a).await;
        // touching another date must not evict the held entry
        drop(locks.acquire(b).await);

        let locks2 = locks.clone();
        let contender = tokio::spawn(async move {
            let _guard = locks2.acquire(a).await;
        });
        // the second writer stays parked until the first guard drops
        tokio::task::yield_now().await;
        assert!(!contender.is_finished());

        drop(guard_a);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn test_state_construction() {
        let state = AppState::new(AppConfig::default(), Arc::new(MemoryStore::new()));
        assert_eq!(state.config.server.port, 8080);
    }
}
