//! ReDB key-value backend

use crate::error::{StorageError, StorageResult};
use crate::traits::KeyValueBackend;
use async_trait::async_trait;
use redb::{Database, TableDefinition};
use std::path::Path;
use std::sync::Mutex;

const KV: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

/// ReDB key-value backend
pub struct RedbBackend {
    db: Mutex<Database>,
}

impl RedbBackend {
    /// Open or create a ReDB database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::create(path).map_err(|e| StorageError::Database(e.to_string()))?;

        // Create the table so reads on a fresh file succeed
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| StorageError::Database(e.to_string()))?;
            {
                let _ = write_txn.open_table(KV)?;
            }
            write_txn.commit()?;
        }

        tracing::debug!("Opened redb store at {}", path.display());
        Ok(Self { db: Mutex::new(db) })
    }
}

#[async_trait]
impl KeyValueBackend for RedbBackend {
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let db = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let read_txn = db
            .begin_read()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let table = read_txn.open_table(KV)?;

        Ok(table.get(key)?.map(|value| value.value().to_vec()))
    }

    async fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let db = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        {
            let mut table = write_txn.open_table(KV)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let db = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        {
            let mut table = write_txn.open_table(KV)?;
            table.remove(key)?;
        }
        write_txn.commit()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_redb_backend() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("test.redb");

        let backend = RedbBackend::open(&db_path).unwrap();
        assert!(backend.get("recipe_book").await.unwrap().is_none());

        backend.put("recipe_book", b"{}").await.unwrap();
        assert_eq!(
            backend.get("recipe_book").await.unwrap(),
            Some(b"{}".to_vec())
        );

        backend.delete("recipe_book").await.unwrap();
        assert!(backend.get("recipe_book").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redb_persists_across_opens() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.redb");

        {
            let backend = RedbBackend::open(&db_path).unwrap();
            backend.put("k", b"v").await.unwrap();
        }

        let backend = RedbBackend::open(&db_path).unwrap();
        assert_eq!(backend.get("k").await.unwrap(), Some(b"v".to_vec()));
    }
}
