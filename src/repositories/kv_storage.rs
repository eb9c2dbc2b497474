// src/repositories/kv_storage.rs
//
// Durable key-value storage.
//
// Every value is a complete document; callers always read and write a key
// as a whole.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::db::{get_connection, ConnectionPool};
use crate::error::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Value stored under `key`, `None` when absent.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Drop `key`; absent keys are ignored.
    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// SQLite-backed storage (`kv_store` table)
pub struct SqliteKeyValueStorage {
    pool: Arc<ConnectionPool>,
}

impl SqliteKeyValueStorage {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    async fn with_connection<T, F>(&self, op: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&rusqlite::Connection) -> AppResult<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let conn = get_connection(&pool)?;
            op(&conn)
        })
        .await?
    }
}

#[async_trait]
impl KeyValueStorage for SqliteKeyValueStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let key = key.to_string();
        self.with_connection(move |conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM kv_store WHERE key = ?1",
                    params![key],
                    |row| row.get::<_, String>(0),
                )
                .optional()
                .map_err(|e| AppError::Storage(format!("Failed to read '{}': {}", key, e)))?;
            Ok(value)
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| AppError::Storage(format!("Failed to write '{}': {}", key, e)))?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let key = key.to_string();
        self.with_connection(move |conn| {
            conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])
                .map_err(|e| AppError::Storage(format!("Failed to remove '{}': {}", key, e)))?;
            Ok(())
        })
        .await
    }
}

/// Process-local storage, used for ephemeral sessions and tests
#[derive(Default)]
pub struct MemoryKeyValueStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::Storage("In-memory storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStorage for MemoryKeyValueStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_connection_pool, create_memory_pool, get_database_path, initialize_database};

    fn sqlite_storage() -> SqliteKeyValueStorage {
        let pool = create_memory_pool().unwrap();
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        SqliteKeyValueStorage::new(Arc::new(pool))
    }

    #[tokio::test]
    async fn test_sqlite_get_missing_key() {
        let storage = sqlite_storage();
        assert_eq!(storage.get("wallpapers").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sqlite_set_overwrites() {
        let storage = sqlite_storage();
        storage.set("wallpapers", "[]").await.unwrap();
        storage.set("wallpapers", "[1]").await.unwrap();
        assert_eq!(storage.get("wallpapers").await.unwrap().as_deref(), Some("[1]"));

        storage.remove("wallpapers").await.unwrap();
        assert_eq!(storage.get("wallpapers").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sqlite_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = get_database_path(dir.path()).unwrap();

        {
            let pool = create_connection_pool(&path).unwrap();
            initialize_database(&get_connection(&pool).unwrap()).unwrap();
            let storage = SqliteKeyValueStorage::new(Arc::new(pool));
            storage.set("@pro_status", "true").await.unwrap();
        }

        let pool = create_connection_pool(&path).unwrap();
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        let storage = SqliteKeyValueStorage::new(Arc::new(pool));
        assert_eq!(storage.get("@pro_status").await.unwrap().as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn test_sqlite_without_schema_reports_storage_error() {
        let pool = create_memory_pool().unwrap();
        let storage = SqliteKeyValueStorage::new(Arc::new(pool));
        let err = storage.set("wallpapers", "[]").await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryKeyValueStorage::new();
        assert_eq!(storage.get("k").await.unwrap(), None);
        storage.set("k", "v").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v"));
        storage.remove("k").await.unwrap();
        storage.remove("k").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), None);
    }
}
