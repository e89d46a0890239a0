//! Versioned recipe book document
//!
//! The whole book is stored as one JSON blob. Documents written before
//! versioning (no `version` field) load as version 0 and are upgraded in
//! memory; the next write stores them at [`CURRENT_VERSION`].

use crate::error::{StorageError, StorageResult};
use flavorgraph_core::Recipe;
use serde::{Deserialize, Serialize};

/// Current document version
pub const CURRENT_VERSION: u32 = 1;

/// Backend key holding the document
pub const RECIPE_BOOK_KEY: &str = "recipe_book";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeBookDocument {
    #[serde(default)]
    pub version: u32,

    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

impl RecipeBookDocument {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            version: CURRENT_VERSION,
            recipes,
        }
    }

    /// Decode a stored document, upgrading older versions
    pub fn decode(bytes: &[u8]) -> StorageResult<Self> {
        let mut doc: Self = serde_json::from_slice(bytes)?;

        if doc.version > CURRENT_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: doc.version,
                supported: CURRENT_VERSION,
            });
        }

        if doc.version < CURRENT_VERSION {
            tracing::info!(
                "Upgrading recipe book from v{} to v{}",
                doc.version,
                CURRENT_VERSION
            );
            doc.version = CURRENT_VERSION;
        }

        Ok(doc)
    }

    pub fn encode(&self) -> StorageResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
