//! Storage backend trait definitions

use crate::error::StorageResult;
use async_trait::async_trait;

/// Byte-oriented key-value store
///
/// Writes are last-write-wins. Implementations must make a `put` visible to
/// every later `get` on any handle to the same store.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    async fn put(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Remove `key`; removing a missing key is not an error
    async fn delete(&self, key: &str) -> StorageResult<()>;
}
