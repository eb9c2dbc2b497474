// src/services/wallpaper_store.rs
//
// Wallpaper Store - the local gallery collection
//
// RULES:
// - One authoritative in-memory list, mirrored whole under one storage key
// - Newest record first (save prepends)
// - Every mutation persists the updated list BEFORE swapping it in, so a
//   failed write leaves the visible collection untouched
// - Mutations are serialized by a single async mutex held across the
//   read-modify-persist sequence

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{validate_wallpaper, DomainError, RecordIdGenerator, WallpaperRecord};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, WallpaperDeleted, WallpaperSaved};
use crate::repositories::KeyValueStorage;

/// Storage key holding the serialized collection
pub const WALLPAPERS_STORAGE_KEY: &str = "wallpapers";

pub struct WallpaperStore {
    storage: Arc<dyn KeyValueStorage>,
    records: Mutex<Vec<WallpaperRecord>>,
    ids: RecordIdGenerator,
    event_bus: Arc<EventBus>,
}

impl WallpaperStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, event_bus: Arc<EventBus>) -> Self {
        Self {
            storage,
            records: Mutex::new(Vec::new()),
            ids: RecordIdGenerator::new(),
            event_bus,
        }
    }

    /// Replace the in-memory collection with what is durably stored.
    ///
    /// Absent data yields an empty gallery. Unreadable or corrupt data
    /// fails the call and also leaves the gallery empty, so the caller can
    /// carry on instead of crashing. Data in an older or non-compact form
    /// is rewritten before the call returns.
    pub async fn load(&self) -> AppResult<usize> {
        let mut records = self.records.lock().await;
        records.clear();

        let raw = self.storage.get(WALLPAPERS_STORAGE_KEY).await.map_err(|e| {
            log::error!("Error loading wallpapers: {}", e);
            e
        })?;

        let Some(raw) = raw else {
            log::debug!("No stored wallpapers yet");
            return Ok(0);
        };

        let loaded = decode_collection(&raw).map_err(|e| {
            log::error!("Stored wallpapers are unreadable, starting empty: {}", e);
            e
        })?;

        let normalized = serde_json::to_string(&loaded)?;
        if normalized != raw {
            log::info!("Rewriting stored wallpapers in the current format");
            self.storage
                .set(WALLPAPERS_STORAGE_KEY, &normalized)
                .await
                .map_err(|e| {
                    log::error!("Error rewriting stored wallpapers: {}", e);
                    e
                })?;
        }

        for record in &loaded {
            self.ids.observe(record.id());
        }
        *records = loaded;

        log::info!("Loaded {} wallpapers", records.len());
        Ok(records.len())
    }

    /// Prepend `record` and persist the whole collection.
    pub async fn save(&self, record: WallpaperRecord) -> AppResult<()> {
        validate_wallpaper(&record)?;

        let mut records = self.records.lock().await;
        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(DomainError::DuplicateId(record.id().to_string()).into());
        }

        let mut updated = Vec::with_capacity(records.len() + 1);
        updated.push(record);
        updated.extend(records.iter().cloned());

        self.persist(&updated).await.map_err(|e| {
            log::error!("Error saving wallpaper: {}", e);
            e
        })?;

        let saved_id = updated[0].id().to_string();
        *records = updated;
        let size = records.len();
        drop(records);

        self.ids.observe(&saved_id);
        self.event_bus.emit(WallpaperSaved::new(saved_id, size));
        Ok(())
    }

    /// Remove the record with `id`.
    ///
    /// Returns whether a record was removed. An unknown id is a successful
    /// no-op and touches neither memory nor storage.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut records = self.records.lock().await;
        if !records.iter().any(|record| record.id() == id) {
            log::debug!("Delete of unknown wallpaper {} ignored", id);
            return Ok(false);
        }

        let updated: Vec<WallpaperRecord> = records
            .iter()
            .filter(|record| record.id() != id)
            .cloned()
            .collect();

        self.persist(&updated).await.map_err(|e| {
            log::error!("Error deleting wallpaper: {}", e);
            e
        })?;

        *records = updated;
        let size = records.len();
        drop(records);

        self.event_bus
            .emit(WallpaperDeleted::new(id.to_string(), size));
        Ok(true)
    }

    /// Snapshot of the collection, newest first
    pub async fn list(&self) -> Vec<WallpaperRecord> {
        self.records.lock().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<WallpaperRecord> {
        self.records
            .lock()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    /// Fresh id, guaranteed to sort after every id this store has seen.
    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }

    async fn persist(&self, records: &[WallpaperRecord]) -> AppResult<()> {
        let encoded = serde_json::to_string(records)?;
        self.storage.set(WALLPAPERS_STORAGE_KEY, &encoded).await
    }
}

fn decode_collection(raw: &str) -> AppResult<Vec<WallpaperRecord>> {
    let records: Vec<WallpaperRecord> =
        serde_json::from_str(raw).map_err(|e| AppError::CorruptStorage {
            key: WALLPAPERS_STORAGE_KEY.to_string(),
            reason: e.to_string(),
        })?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.id()) {
            return Err(AppError::CorruptStorage {
                key: WALLPAPERS_STORAGE_KEY.to_string(),
                reason: format!("duplicate wallpaper id {}", record.id()),
            });
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MemoryKeyValueStorage, MockKeyValueStorage};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::time::Duration;

    fn record(id: &str, prompt: &str) -> WallpaperRecord {
        WallpaperRecord::from_parts(
            id.to_string(),
            prompt.to_string(),
            format!("data:image/jpeg;base64,{}", id),
            "2024-05-01T10:00:00.000Z".to_string(),
        )
    }

    fn memory_store() -> (WallpaperStore, Arc<MemoryKeyValueStorage>) {
        let storage = Arc::new(MemoryKeyValueStorage::new());
        let store = WallpaperStore::new(storage.clone(), Arc::new(EventBus::new()));
        (store, storage)
    }

    async fn persisted(storage: &MemoryKeyValueStorage) -> Option<String> {
        storage.get(WALLPAPERS_STORAGE_KEY).await.unwrap()
    }

    #[tokio::test]
    async fn test_load_without_data_is_empty() {
        let (store, _) = memory_store();
        assert_eq!(store.load().await.unwrap(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let (store, storage) = memory_store();
        let r = record("1714557600000", "sunset beach");
        store.save(r.clone()).await.unwrap();

        let reopened = WallpaperStore::new(storage, Arc::new(EventBus::new()));
        assert_eq!(reopened.load().await.unwrap(), 1);
        assert_eq!(reopened.get("1714557600000").await, Some(r));
    }

    #[tokio::test]
    async fn test_newest_first_ordering() {
        let (store, storage) = memory_store();
        for (id, prompt) in [("1", "r1"), ("2", "r2"), ("3", "r3")] {
            store.save(record(id, prompt)).await.unwrap();
        }

        let reopened = WallpaperStore::new(storage, Arc::new(EventBus::new()));
        reopened.load().await.unwrap();
        let prompts: Vec<String> = reopened
            .list()
            .await
            .iter()
            .map(|r| r.prompt().to_string())
            .collect();
        assert_eq!(prompts, vec!["r3", "r2", "r1"]);
    }

    #[tokio::test]
    async fn test_memory_matches_storage_after_each_operation() {
        let (store, storage) = memory_store();

        store.save(record("1", "a")).await.unwrap();
        store.save(record("2", "b")).await.unwrap();
        assert_eq!(
            persisted(&storage).await.unwrap(),
            serde_json::to_string(&store.list().await).unwrap()
        );

        store.delete("1").await.unwrap();
        assert_eq!(
            persisted(&storage).await.unwrap(),
            serde_json::to_string(&store.list().await).unwrap()
        );
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let (store, _) = memory_store();
        store.save(record("1", "a")).await.unwrap();

        let err = store.save(record("1", "b")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_record_rejected_before_write() {
        let mut storage = MockKeyValueStorage::new();
        storage.expect_set().never();
        let store = WallpaperStore::new(Arc::new(storage), Arc::new(EventBus::new()));

        let err = store.save(record("1", "  ")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let (store, storage) = memory_store();
        store.save(record("1", "a")).await.unwrap();
        let before = persisted(&storage).await;

        assert!(!store.delete("does-not-exist").await.unwrap());
        assert_eq!(store.len().await, 1);
        assert_eq!(persisted(&storage).await, before);
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let (store, _) = memory_store();
        store.save(record("1", "a")).await.unwrap();
        store.save(record("2", "b")).await.unwrap();

        assert!(store.delete("1").await.unwrap());
        let remaining = store.list().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id(), "2");
    }

    #[tokio::test]
    async fn test_failed_write_leaves_collection_unchanged() {
        let mut storage = MockKeyValueStorage::new();
        storage
            .expect_set()
            .times(1)
            .returning(|_, _| Err(AppError::Storage("disk full".to_string())));
        let store = WallpaperStore::new(Arc::new(storage), Arc::new(EventBus::new()));

        let before = store.list().await;
        let err = store.save(record("1", "a")).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn test_failed_delete_write_keeps_record() {
        let mut storage = MockKeyValueStorage::new();
        let mut seq = mockall::Sequence::new();
        storage
            .expect_set()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        storage
            .expect_set()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(AppError::Storage("read-only".to_string())));
        let store = WallpaperStore::new(Arc::new(storage), Arc::new(EventBus::new()));

        store.save(record("1", "a")).await.unwrap();
        assert!(store.delete("1").await.is_err());
        assert!(store.get("1").await.is_some());
    }

    #[tokio::test]
    async fn test_corrupt_data_fails_and_leaves_empty() {
        let (store, storage) = memory_store();
        store.save(record("1", "a")).await.unwrap();
        storage.set(WALLPAPERS_STORAGE_KEY, "{not json").await.unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, AppError::CorruptStorage { .. }));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_ids_in_storage_are_corrupt() {
        let (store, storage) = memory_store();
        let raw = serde_json::to_string(&vec![record("1", "a"), record("1", "b")]).unwrap();
        storage.set(WALLPAPERS_STORAGE_KEY, &raw).await.unwrap();

        assert!(matches!(
            store.load().await,
            Err(AppError::CorruptStorage { .. })
        ));
    }

    #[tokio::test]
    async fn test_read_failure_leaves_empty() {
        let mut storage = MockKeyValueStorage::new();
        storage
            .expect_get()
            .returning(|_| Err(AppError::Storage("io".to_string())));
        let store = WallpaperStore::new(Arc::new(storage), Arc::new(EventBus::new()));

        assert!(store.load().await.is_err());
        assert!(store.is_empty().await);
    }

    const LEGACY_PRETTY: &str = r#"[
  {
    "id": "1",
    "prompt": "lake",
    "imageData": "https://x/1.jpg",
    "createdAt": "2024-05-01T10:00:00.000Z"
  }
]"#;

    #[tokio::test]
    async fn test_load_rewrites_legacy_data() {
        let (store, storage) = memory_store();
        storage
            .set(WALLPAPERS_STORAGE_KEY, LEGACY_PRETTY)
            .await
            .unwrap();

        assert_eq!(store.load().await.unwrap(), 1);
        assert_eq!(store.get("1").await.unwrap().image_data(), "https://x/1.jpg");

        let stored = persisted(&storage).await.unwrap();
        assert_eq!(stored, serde_json::to_string(&store.list().await).unwrap());
        assert!(stored.contains(r#""imageUrl":"https://x/1.jpg""#));
    }

    #[tokio::test]
    async fn test_load_of_current_data_does_not_write() {
        let raw = serde_json::to_string(&vec![record("1", "a")]).unwrap();
        let mut storage = MockKeyValueStorage::new();
        storage
            .expect_get()
            .returning(move |_| Ok(Some(raw.clone())));
        storage.expect_set().never();
        let store = WallpaperStore::new(Arc::new(storage), Arc::new(EventBus::new()));

        assert_eq!(store.load().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failed_rewrite_leaves_empty() {
        let mut storage = MockKeyValueStorage::new();
        storage
            .expect_get()
            .returning(|_| Ok(Some(LEGACY_PRETTY.to_string())));
        storage
            .expect_set()
            .times(1)
            .returning(|_, _| Err(AppError::Storage("read-only".to_string())));
        let store = WallpaperStore::new(Arc::new(storage), Arc::new(EventBus::new()));

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_next_id_follows_loaded_ids() {
        let (store, storage) = memory_store();
        let far_future = "99999999999999";
        let raw = serde_json::to_string(&vec![record(far_future, "a")]).unwrap();
        storage.set(WALLPAPERS_STORAGE_KEY, &raw).await.unwrap();

        store.load().await.unwrap();
        let next: i64 = store.next_id().parse().unwrap();
        assert!(next > far_future.parse::<i64>().unwrap());
    }

    #[tokio::test]
    async fn test_save_emits_event() {
        let storage = Arc::new(MemoryKeyValueStorage::new());
        let bus = Arc::new(EventBus::new());
        let store = WallpaperStore::new(storage, bus.clone());

        store.save(record("1", "a")).await.unwrap();
        store.delete("1").await.unwrap();

        let log = bus.get_event_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].event_type, "WallpaperSaved");
        assert_eq!(log[1].event_type, "WallpaperDeleted");
    }

    /// Storage that yields between read and write so interleaving would show.
    struct SlowStorage {
        inner: MemoryKeyValueStorage,
    }

    #[async_trait]
    impl KeyValueStorage for SlowStorage {
        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> AppResult<()> {
            tokio::time::sleep(Duration::from_millis(2)).await;
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> AppResult<()> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_are_serialized() {
        let storage = Arc::new(SlowStorage {
            inner: MemoryKeyValueStorage::new(),
        });
        let store = Arc::new(WallpaperStore::new(storage.clone(), Arc::new(EventBus::new())));

        let mut handles = Vec::new();
        for n in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let id = store.next_id();
                store.save(record(&id, &format!("prompt {}", n))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let records = store.list().await;
        assert_eq!(records.len(), 20);
        let ids: HashSet<&str> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), 20);

        let stored = storage.get(WALLPAPERS_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(stored, serde_json::to_string(&records).unwrap());
    }
}
