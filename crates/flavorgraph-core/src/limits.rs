//! Limits shared by the search pipeline and the recipe book

/// Weakest pairing strength
pub const MIN_STRENGTH: u8 = 1;

/// Strongest pairing strength (holy grail)
pub const MAX_STRENGTH: u8 = 4;

/// Maximum ingredient names taken from a pipe-separated provider answer
pub const MAX_RESPONSE_INGREDIENTS: usize = 3;

/// Maximum candidates offered to the provider on a re-prompt
pub const MAX_REPROMPT_CANDIDATES: usize = 15;

/// Longest phrase (in tokens) the query decomposer tries
pub const MAX_PHRASE_TOKENS: usize = 3;

/// Shortest token (in chars) the query decomposer keeps
pub const MIN_TOKEN_LEN: usize = 2;

/// Maximum length for recipe names (128 chars)
pub const MAX_RECIPE_NAME_LEN: usize = 128;

/// Maximum ingredients per recipe (50)
pub const MAX_RECIPE_INGREDIENTS: usize = 50;

/// Maximum length for recipe notes (4KB)
pub const MAX_RECIPE_NOTES_LEN: usize = 4096;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    StrengthOutOfRange { value: u8 },
    EmptyRecipeName,
    RecipeNameTooLong { len: usize, max: usize },
    NoIngredients,
    TooManyIngredients { count: usize, max: usize },
    NotesTooLong { len: usize, max: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrengthOutOfRange { value } => write!(
                f,
                "Pairing strength {} out of range ({}-{})",
                value, MIN_STRENGTH, MAX_STRENGTH
            ),
            Self::EmptyRecipeName => write!(f, "Recipe name cannot be empty"),
            Self::RecipeNameTooLong { len, max } => {
                write!(f, "Recipe name too long: {} chars (max {})", len, max)
            }
            Self::NoIngredients => write!(f, "Recipe needs at least one ingredient"),
            Self::TooManyIngredients { count, max } => {
                write!(f, "Too many ingredients: {} (max {})", count, max)
            }
            Self::NotesTooLong { len, max } => {
                write!(f, "Recipe notes too long: {} chars (max {})", len, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate recipe name
pub fn validate_recipe_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err(ValidationError::EmptyRecipeName);
    }
    if len > MAX_RECIPE_NAME_LEN {
        return Err(ValidationError::RecipeNameTooLong {
            len,
            max: MAX_RECIPE_NAME_LEN,
        });
    }
    Ok(())
}

/// Validate recipe ingredient count
pub fn validate_ingredient_count(count: usize) -> Result<(), ValidationError> {
    if count == 0 {
        return Err(ValidationError::NoIngredients);
    }
    if count > MAX_RECIPE_INGREDIENTS {
        return Err(ValidationError::TooManyIngredients {
            count,
            max: MAX_RECIPE_INGREDIENTS,
        });
    }
    Ok(())
}

/// Validate recipe notes
pub fn validate_notes(notes: &str) -> Result<(), ValidationError> {
    let len = notes.chars().count();
    if len > MAX_RECIPE_NOTES_LEN {
        return Err(ValidationError::NotesTooLong {
            len,
            max: MAX_RECIPE_NOTES_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_recipe_name() {
        assert!(validate_recipe_name("Caprese").is_ok());
        assert_eq!(
            validate_recipe_name("   "),
            Err(ValidationError::EmptyRecipeName)
        );
        assert!(validate_recipe_name(&"x".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_ingredient_count() {
        assert_eq!(
            validate_ingredient_count(0),
            Err(ValidationError::NoIngredients)
        );
        assert!(validate_ingredient_count(3).is_ok());
        assert!(validate_ingredient_count(MAX_RECIPE_INGREDIENTS + 1).is_err());
    }

    #[test]
    fn test_validate_notes() {
        assert!(validate_notes("").is_ok());
        assert!(validate_notes(&"x".repeat(MAX_RECIPE_NOTES_LEN + 1)).is_err());
    }
}
