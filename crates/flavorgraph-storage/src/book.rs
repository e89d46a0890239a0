//! Recipe book repository
//!
//! Reads the stored document once, on first use, and serves every later read
//! from its own cache. Each mutation writes the full document back before
//! returning. The cache belongs to the instance, so two books over the same
//! backend only see each other's writes when they load after them.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, MutexGuard};

use crate::document::{RecipeBookDocument, RECIPE_BOOK_KEY};
use crate::error::{StorageError, StorageResult};
use crate::traits::KeyValueBackend;
use flavorgraph_core::{NewRecipe, Recipe, RecipeId};

pub struct RecipeBook<B: KeyValueBackend + ?Sized> {
    backend: Arc<B>,
    cache: Mutex<Option<Vec<Recipe>>>,
}

impl<B: KeyValueBackend + ?Sized> RecipeBook<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            cache: Mutex::new(None),
        }
    }

    /// Lock the cache, loading it from the backend on first use
    async fn loaded(&self) -> StorageResult<MutexGuard<'_, Option<Vec<Recipe>>>> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            let recipes = match self.backend.get(RECIPE_BOOK_KEY).await? {
                Some(bytes) => RecipeBookDocument::decode(&bytes)?.recipes,
                None => Vec::new(),
            };
            tracing::debug!("Loaded {} recipes", recipes.len());
            *cache = Some(recipes);
        }
        Ok(cache)
    }

    async fn write_through(&self, recipes: &[Recipe]) -> StorageResult<()> {
        let doc = RecipeBookDocument::new(recipes.to_vec());
        self.backend.put(RECIPE_BOOK_KEY, &doc.encode()?).await
    }

    pub async fn list(&self) -> StorageResult<Vec<Recipe>> {
        let cache = self.loaded().await?;
        Ok(cache.as_deref().unwrap_or_default().to_vec())
    }

    pub async fn get(&self, id: &RecipeId) -> StorageResult<Option<Recipe>> {
        let cache = self.loaded().await?;
        Ok(cache
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|r| &r.id == id)
            .cloned())
    }

    pub async fn add(&self, new: NewRecipe) -> StorageResult<Recipe> {
        let recipe = Recipe::from_new(new)?;

        let mut cache = self.loaded().await?;
        let mut recipes = cache.take().unwrap_or_default();
        recipes.push(recipe.clone());
        let written = self.write_through(&recipes).await;
        if written.is_err() {
            recipes.pop();
        }
        *cache = Some(recipes);
        written?;

        tracing::info!("Added recipe {} ({})", recipe.name, recipe.id);
        Ok(recipe)
    }

    /// Replace the stored recipe with the same id
    pub async fn update(&self, mut recipe: Recipe) -> StorageResult<Recipe> {
        recipe.validate()?;
        recipe.updated_at = Utc::now();

        let mut cache = self.loaded().await?;
        let recipes = cache.as_deref().unwrap_or_default();
        let Some(pos) = recipes.iter().position(|r| r.id == recipe.id) else {
            return Err(StorageError::RecipeNotFound(recipe.id.to_string()));
        };

        let mut next = recipes.to_vec();
        next[pos] = recipe.clone();
        self.write_through(&next).await?;
        *cache = Some(next);

        tracing::info!("Updated recipe {}", recipe.id);
        Ok(recipe)
    }

    /// Remove a recipe; returns whether it existed
    pub async fn remove(&self, id: &RecipeId) -> StorageResult<bool> {
        let mut cache = self.loaded().await?;
        let recipes = cache.as_deref().unwrap_or_default();
        if !recipes.iter().any(|r| &r.id == id) {
            return Ok(false);
        }

        let next: Vec<Recipe> = recipes.iter().filter(|r| &r.id != id).cloned().collect();
        self.write_through(&next).await?;
        *cache = Some(next);

        tracing::info!("Removed recipe {}", id);
        Ok(true)
    }

    /// Delete every recipe
    pub async fn clear(&self) -> StorageResult<()> {
        let mut cache = self.cache.lock().await;
        self.backend.delete(RECIPE_BOOK_KEY).await?;
        *cache = Some(Vec::new());
        tracing::info!("Cleared recipe book");
        Ok(())
    }
}
