//! In-memory key-value backend for testing

use crate::error::{StorageError, StorageResult};
use crate::traits::KeyValueBackend;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory key-value backend
///
/// Useful for testing and for sessions that should leave nothing behind.
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        entries.remove(key);
        Ok(())
    }
}
