//! Flavorgraph Storage - Persistence for the recipe book
//!
//! Backends store opaque bytes under string keys. [`RecipeBook`] keeps the
//! whole book as one versioned JSON document on top of any backend.

#![allow(clippy::result_large_err)]

pub mod book;
pub mod document;
pub mod error;
pub mod traits;

#[cfg(feature = "redb")]
pub mod redb;

pub mod memory;

pub use book::RecipeBook;
pub use document::{RecipeBookDocument, CURRENT_VERSION};
pub use error::{StorageError, StorageResult};
pub use traits::KeyValueBackend;

#[cfg(feature = "redb")]
pub use redb::RedbBackend;

pub use memory::MemoryBackend;
