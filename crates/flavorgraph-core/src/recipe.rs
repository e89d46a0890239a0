//! Recipe types for the personal recipe book

use crate::error::Result;
use crate::limits::{validate_ingredient_count, validate_notes, validate_recipe_name};
use crate::node::NodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a recipe
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeId(pub Ulid);

impl RecipeId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn from_string(s: &str) -> std::result::Result<Self, ulid::DecodeError> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A saved combination of ingredients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,

    /// Node ids, in the order the user added them
    pub ingredients: Vec<NodeId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Build a recipe from user input, validating it first
    pub fn from_new(new: NewRecipe) -> Result<Self> {
        new.validate()?;
        let now = Utc::now();
        let mut recipe = Self {
            id: RecipeId::new(),
            name: new.name.trim().to_string(),
            ingredients: Vec::with_capacity(new.ingredients.len()),
            notes: new.notes.filter(|n| !n.trim().is_empty()),
            created_at: now,
            updated_at: now,
        };
        for ingredient in new.ingredients {
            recipe.push_ingredient(NodeId::new(ingredient));
        }
        Ok(recipe)
    }

    fn push_ingredient(&mut self, id: NodeId) -> bool {
        if self.ingredients.contains(&id) {
            return false;
        }
        self.ingredients.push(id);
        true
    }

    /// Add an ingredient; duplicates are ignored
    pub fn add_ingredient(&mut self, id: impl Into<NodeId>) -> bool {
        let added = self.push_ingredient(id.into());
        if added {
            self.updated_at = Utc::now();
        }
        added
    }

    /// Remove an ingredient
    pub fn remove_ingredient(&mut self, id: &NodeId) -> bool {
        if let Some(pos) = self.ingredients.iter().position(|i| i == id) {
            self.ingredients.remove(pos);
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }

    /// Check the recipe still satisfies the recipe limits
    pub fn validate(&self) -> Result<()> {
        validate_recipe_name(&self.name)?;
        validate_ingredient_count(self.ingredients.len())?;
        if let Some(ref notes) = self.notes {
            validate_notes(notes)?;
        }
        Ok(())
    }
}

/// Data for creating a new recipe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewRecipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_ingredient(mut self, id: impl Into<String>) -> Self {
        self.ingredients.push(id.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_recipe_name(&self.name)?;
        validate_ingredient_count(self.ingredients.len())?;
        if let Some(ref notes) = self.notes {
            validate_notes(notes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::limits::ValidationError;

    #[test]
    fn test_recipe_from_new() {
        let recipe = Recipe::from_new(
            NewRecipe::new("  Caprese ")
                .with_ingredient("tomato")
                .with_ingredient("basil")
                .with_ingredient("tomato")
                .with_notes("Use good olive oil"),
        )
        .unwrap();

        assert_eq!(recipe.name, "Caprese");
        assert_eq!(
            recipe.ingredients,
            vec![NodeId::new("tomato"), NodeId::new("basil")]
        );
        assert_eq!(recipe.notes.as_deref(), Some("Use good olive oil"));
    }

    #[test]
    fn test_recipe_requires_ingredients() {
        let err = Recipe::from_new(NewRecipe::new("Empty")).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NoIngredients)
        ));
    }

    #[test]
    fn test_ingredient_edits() {
        let mut recipe =
            Recipe::from_new(NewRecipe::new("Salad").with_ingredient("tomato")).unwrap();

        assert!(recipe.add_ingredient("mozzarella"));
        assert!(!recipe.add_ingredient("mozzarella"));
        assert!(recipe.remove_ingredient(&NodeId::new("tomato")));
        assert!(!recipe.remove_ingredient(&NodeId::new("tomato")));
        assert_eq!(recipe.ingredients, vec![NodeId::new("mozzarella")]);
    }
}
