//! Ingredient categories

use serde::{Deserialize, Serialize};

/// Fixed set of ingredient categories
///
/// Datasets may carry category strings this build does not know about;
/// those deserialize to [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Cuisine,
    MeatPoultry,
    Seafood,
    DairyCheese,
    Vegetables,
    HerbsSpices,
    Fruits,
    Legumes,
    GrainsStarches,
    NutsSeeds,
    OilsVinegars,
    SaucesCondiments,
    Beverages,
    SweetsDesserts,
    TechniquesDishes,
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 16] = [
        Category::Cuisine,
        Category::MeatPoultry,
        Category::Seafood,
        Category::DairyCheese,
        Category::Vegetables,
        Category::HerbsSpices,
        Category::Fruits,
        Category::Legumes,
        Category::GrainsStarches,
        Category::NutsSeeds,
        Category::OilsVinegars,
        Category::SaucesCondiments,
        Category::Beverages,
        Category::SweetsDesserts,
        Category::TechniquesDishes,
        Category::Other,
    ];

    /// Stable identifier used in datasets and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cuisine => "cuisine",
            Self::MeatPoultry => "meat_poultry",
            Self::Seafood => "seafood",
            Self::DairyCheese => "dairy_cheese",
            Self::Vegetables => "vegetables",
            Self::HerbsSpices => "herbs_spices",
            Self::Fruits => "fruits",
            Self::Legumes => "legumes",
            Self::GrainsStarches => "grains_starches",
            Self::NutsSeeds => "nuts_seeds",
            Self::OilsVinegars => "oils_vinegars",
            Self::SaucesCondiments => "sauces_condiments",
            Self::Beverages => "beverages",
            Self::SweetsDesserts => "sweets_desserts",
            Self::TechniquesDishes => "techniques_dishes",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cuisine => "Cuisine & Region",
            Self::MeatPoultry => "Meat & Poultry",
            Self::Seafood => "Seafood & Fish",
            Self::DairyCheese => "Dairy & Cheese",
            Self::Vegetables => "Vegetables",
            Self::HerbsSpices => "Herbs & Spices",
            Self::Fruits => "Fruits",
            Self::Legumes => "Legumes & Beans",
            Self::GrainsStarches => "Grains & Starches",
            Self::NutsSeeds => "Nuts & Seeds",
            Self::OilsVinegars => "Oils & Vinegars",
            Self::SaucesCondiments => "Sauces & Condiments",
            Self::Beverages => "Beverages",
            Self::SweetsDesserts => "Sweets & Desserts",
            Self::TechniquesDishes => "Techniques & Dish Types",
            Self::Other => "Other",
        }
    }

    /// Parse a category identifier, returning `None` for unknown values
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == wanted)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::parse(&s).unwrap_or(Self::Other)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}
