//! Durable storage for the shopping list.
//!
//! The list is stored as one JSON document under a single fixed key of a
//! [`KeyValueStore`]. Every save rewrites the whole document; there is no
//! incremental persistence and no write-ahead log.

use crate::domain::ShoppingItem;
use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;

/// Key the shopping list is stored under.
pub const STORAGE_KEY: &str = "SHOPPING_LIST";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Serialization failed: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Invalid stored list - {0}")]
    Decode(#[source] serde_json::Error),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Minimal string-keyed durable store.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if nothing was written.
    fn get(&self, key: &str) -> impl Future<Output = StorageResult<Option<String>>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = StorageResult<()>> + Send;
}

/// Stores each key as a `<key>.json` file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::Io {
                path: self.dir.clone(),
                source,
            })?;
        // The previous value stays readable until the rename
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|source| StorageError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| StorageError::Io { path, source })
    }
}

/// Process-local store. Values are gone when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads and saves the whole shopping list through a [`KeyValueStore`].
#[derive(Debug)]
pub struct ListRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ListRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serializes `items` and overwrites the stored list.
    ///
    /// Saving the same items twice writes the same bytes.
    pub async fn save_items(&self, items: &[ShoppingItem]) -> PersistenceResult<()> {
        let json = encode_items(items)?;
        self.store.set(STORAGE_KEY, &json).await?;
        tracing::debug!(count = items.len(), "saved shopping list");
        Ok(())
    }

    /// Reads the stored list, or an empty list if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// A stored value that is not a valid list is reported as
    /// [`PersistenceError::Decode`] rather than treated as empty.
    pub async fn load_items(&self) -> PersistenceResult<Vec<ShoppingItem>> {
        let Some(json) = self.store.get(STORAGE_KEY).await? else {
            tracing::info!("no saved shopping list, starting empty");
            return Ok(Vec::new());
        };
        let items = decode_items(&json)?;
        tracing::info!(count = items.len(), "loaded shopping list");
        Ok(items)
    }
}

pub fn encode_items(items: &[ShoppingItem]) -> PersistenceResult<String> {
    serde_json::to_string(items).map_err(PersistenceError::Encode)
}

pub fn decode_items(json: &str) -> PersistenceResult<Vec<ShoppingItem>> {
    serde_json::from_str(json).map_err(PersistenceError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn milk() -> ShoppingItem {
        ShoppingItem::with_id("a", "Milk", 2)
    }

    #[test]
    fn test_single_item_round_trip() {
        let mut item = ShoppingItem::new("Crème fraîche \"extra\"", -7);
        item.purchased = true;
        let decoded = decode_items(&encode_items(&[item.clone()]).unwrap()).unwrap();
        assert_eq!(decoded, vec![item]);
    }

    #[test]
    fn test_encoding_is_stable() {
        let items = vec![milk(), ShoppingItem::with_id("b", "Eggs", 12)];
        assert_eq!(encode_items(&items).unwrap(), encode_items(&items).unwrap());
        assert_eq!(
            encode_items(&[milk()]).unwrap(),
            r#"[{"id":"a","name":"Milk","quantity":2,"purchased":false}]"#
        );
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        assert!(matches!(decode_items("{}"), Err(PersistenceError::Decode(_))));
        assert!(matches!(decode_items("not json"), Err(PersistenceError::Decode(_))));
        assert!(matches!(
            decode_items(r#"[{"id":"a","name":"Milk"}]"#),
            Err(PersistenceError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_load_without_save_is_empty() {
        let repo = ListRepository::new(MemoryStore::new());
        assert!(repo.load_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_order() {
        let repo = ListRepository::new(MemoryStore::new());
        let mut eggs = ShoppingItem::with_id("b", "Eggs", 12);
        eggs.purchased = true;
        let items = vec![eggs, milk()];

        repo.save_items(&items).await.unwrap();
        assert_eq!(repo.load_items().await.unwrap(), items);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_value() {
        let repo = ListRepository::new(MemoryStore::new());
        repo.save_items(&[milk(), ShoppingItem::with_id("b", "Eggs", 12)])
            .await
            .unwrap();
        repo.save_items(&[milk()]).await.unwrap();
        assert_eq!(repo.load_items().await.unwrap(), vec![milk()]);

        repo.save_items(&[]).await.unwrap();
        assert!(repo.load_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_is_idempotent() {
        let repo = ListRepository::new(MemoryStore::new());
        repo.save_items(&[milk()]).await.unwrap();
        let first = repo.store().get(STORAGE_KEY).await.unwrap();
        repo.save_items(&[milk()]).await.unwrap();
        let second = repo.store().get(STORAGE_KEY).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_corrupt_value_is_an_error() {
        let store = MemoryStore::new();
        store.set(STORAGE_KEY, "[{\"id\":").await.unwrap();
        let repo = ListRepository::new(store);
        assert!(matches!(
            repo.load_items().await,
            Err(PersistenceError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_file_store_survives_new_repository() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("nested").join("data");

        let repo = ListRepository::new(FileStore::new(&data_dir));
        repo.save_items(&[milk()]).await.unwrap();
        drop(repo);

        let fresh = ListRepository::new(FileStore::new(&data_dir));
        assert_eq!(fresh.load_items().await.unwrap(), vec![milk()]);
        assert!(data_dir.join("SHOPPING_LIST.json").exists());
    }

    #[tokio::test]
    async fn test_file_store_missing_key() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get(STORAGE_KEY).await.unwrap(), None);
        assert_eq!(store.dir(), dir.path());
    }

    #[tokio::test]
    async fn test_file_store_replaces_value_without_leaving_temp_file() {
        let dir = TempDir::new().unwrap();
        let repo = ListRepository::new(FileStore::new(dir.path()));
        repo.save_items(&[milk(), ShoppingItem::with_id("b", "Eggs", 12)])
            .await
            .unwrap();
        repo.save_items(&[milk()]).await.unwrap();

        assert_eq!(repo.load_items().await.unwrap(), vec![milk()]);
        assert!(!dir.path().join("SHOPPING_LIST.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_ignores_leftover_temp_file() {
        let dir = TempDir::new().unwrap();
        let repo = ListRepository::new(FileStore::new(dir.path()));
        repo.save_items(&[milk()]).await.unwrap();

        // A write interrupted before the rename leaves only a partial temp file
        std::fs::write(dir.path().join("SHOPPING_LIST.json.tmp"), "").unwrap();

        assert_eq!(repo.load_items().await.unwrap(), vec![milk()]);

        repo.save_items(&[]).await.unwrap();
        assert!(repo.load_items().await.unwrap().is_empty());
        assert!(!dir.path().join("SHOPPING_LIST.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.set("../escape", "x").await,
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.get("").await, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_file_store_write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let repo = ListRepository::new(FileStore::new(&blocker));
        assert!(matches!(
            repo.save_items(&[milk()]).await,
            Err(PersistenceError::Storage(StorageError::Io { .. }))
        ));
    }
}
