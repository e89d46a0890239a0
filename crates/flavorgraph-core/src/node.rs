//! Node (ingredient) types

use crate::category::Category;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An ingredient in the pairing graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,

    /// Display name
    pub name: String,

    /// Category used for colouring and filtering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Numeric cluster assigned by the data pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<i64>,

    /// Image reference (URL or asset path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Node {
    /// Create a new node with no category, group or image
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            group: None,
            image: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_group(mut self, group: i64) -> Self {
        self.group = Some(group);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Lowercased display name, the form every matcher compares against
    pub fn normalized_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Whether the node belongs to one of `categories`
    ///
    /// Uncategorised nodes count as [`Category::Other`].
    pub fn in_categories(&self, categories: &[Category]) -> bool {
        let category = self.category.unwrap_or(Category::Other);
        categories.contains(&category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = Node::new("basil", "Basil")
            .with_category(Category::HerbsSpices)
            .with_group(3);

        assert_eq!(node.id.as_str(), "basil");
        assert_eq!(node.normalized_name(), "basil");
        assert_eq!(node.category, Some(Category::HerbsSpices));
        assert_eq!(node.group, Some(3));
        assert!(node.image.is_none());
    }

    #[test]
    fn test_in_categories() {
        let herb = Node::new("basil", "basil").with_category(Category::HerbsSpices);
        let bare = Node::new("mystery", "mystery");

        assert!(herb.in_categories(&[Category::HerbsSpices, Category::Fruits]));
        assert!(!herb.in_categories(&[Category::Fruits]));
        assert!(bare.in_categories(&[Category::Other]));
    }

    #[test]
    fn test_node_id_serializes_as_string() {
        let json = serde_json::to_string(&NodeId::new("tomato")).unwrap();
        assert_eq!(json, "\"tomato\"");
    }
}
