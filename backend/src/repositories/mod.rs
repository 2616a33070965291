//! Persistence layer
//!
//! Everything is stored as JSON strings in an opaque key-value store
//! behind [`KeyValueStore`]; the typed repositories own the key schema
//! and the encoding. Diary entries decode leniently so one corrupt value
//! never takes a date offline.

pub mod memory;
pub mod redis_store;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use fitdiary_shared::diary::DiaryEntry;
use fitdiary_shared::types::UserRecord;
use std::sync::Arc;
use tracing::warn;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Key prefix for per-date diary entries
pub const DIARY_KEY_PREFIX: &str = "diary:";
/// Key holding the UI's currently selected diary date
pub const SELECTED_DATE_KEY: &str = "diary:selected-date";
/// Key prefix for user profiles
pub const PROFILE_KEY_PREFIX: &str = "profile:";

/// Storage key for one diary date
pub fn diary_key(date: NaiveDate) -> String {
    format!("{}{}", DIARY_KEY_PREFIX, date.format("%Y-%m-%d"))
}

/// Storage key for one user profile
pub fn profile_key(telegram_id: i64) -> String {
    format!("{}{}", PROFILE_KEY_PREFIX, telegram_id)
}

/// Minimal async string-to-string store.
///
/// The seam between the service layer and Redis; tests swap in
/// [`MemoryStore`].
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: String) -> Result<()>;
}

/// Typed access to diary entries and the selected date
#[derive(Clone)]
pub struct DiaryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl DiaryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Fetch the entry for a date; `None` when nothing was ever stored.
    ///
    /// Stored values decode leniently: well-formed fields are kept,
    /// the rest fall back to defaults.
    pub async fn get_entry(&self, date: NaiveDate) -> Result<Option<DiaryEntry>> {
        let raw = self.store.get(&diary_key(date)).await?;
        Ok(raw.map(|raw| {
            if serde_json::from_str::<DiaryEntry>(&raw).is_err() {
                warn!(%date, "stored diary entry is malformed, recovering what parses");
            }
            DiaryEntry::from_json_lossy(&raw)
        }))
    }

    /// Fetch the entry for a date, or a zeroed default. Entries are
    /// created lazily; reading never writes.
    pub async fn get_entry_or_default(&self, date: NaiveDate) -> Result<DiaryEntry> {
        Ok(self.get_entry(date).await?.unwrap_or_default())
    }

    /// Overwrite the entry for a date
    pub async fn put_entry(&self, date: NaiveDate, entry: &DiaryEntry) -> Result<()> {
        let raw = serde_json::to_string(entry)?;
        self.store.put(&diary_key(date), raw).await
    }

    /// The UI's currently selected date, if one was stored
    pub async fn selected_date(&self) -> Result<Option<NaiveDate>> {
        let raw = self.store.get(SELECTED_DATE_KEY).await?;
        Ok(raw.and_then(|raw| raw.parse().ok()))
    }

    pub async fn set_selected_date(&self, date: NaiveDate) -> Result<()> {
        self.store
            .put(SELECTED_DATE_KEY, date.format("%Y-%m-%d").to_string())
            .await
    }
}

/// Typed access to user records
#[derive(Clone)]
pub struct ProfileRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ProfileRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn get_user(&self, telegram_id: i64) -> Result<Option<UserRecord>> {
        let raw = self.store.get(&profile_key(telegram_id)).await?;
        match raw {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(user) => Ok(Some(user)),
                Err(err) => {
                    warn!(telegram_id, error = %err, "stored profile failed to decode");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    pub async fn put_user(&self, user: &UserRecord) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.store.put(&profile_key(user.telegram_id), raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_schema() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(diary_key(date), "diary:2024-03-07");
        assert_eq!(profile_key(42), "profile:42");
        assert_eq!(SELECTED_DATE_KEY, "diary:selected-date");
    }

    #[tokio::test]
    async fn test_diary_repository_roundtrip() {
        let repo = DiaryRepository::new(Arc::new(MemoryStore::new()));
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        assert!(repo.get_entry(date).await.unwrap().is_none());

        let mut entry = DiaryEntry::default();
        entry.water_l = 1.5;
        repo.put_entry(date, &entry).await.unwrap();

        let loaded = repo.get_entry(date).await.unwrap().unwrap();
        assert_eq!(loaded, entry);
    }

    #[tokio::test]
    async fn test_corrupt_entry_degrades_to_default() {
        let store = Arc::new(MemoryStore::new());
        store
            .put(&diary_key(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()), "{broken".to_string())
            .await
            .unwrap();

        let repo = DiaryRepository::new(store);
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let entry = repo.get_entry(date).await.unwrap().unwrap();
        assert_eq!(entry, DiaryEntry::default());
    }

    #[tokio::test]
    async fn test_selected_date_roundtrip() {
        let repo = DiaryRepository::new(Arc::new(MemoryStore::new()));
        assert!(repo.selected_date().await.unwrap().is_none());

        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        repo.set_selected_date(date).await.unwrap();
        assert_eq!(repo.selected_date().await.unwrap(), Some(date));
    }
}
