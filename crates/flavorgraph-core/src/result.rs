//! Search result returned by the resolution pipeline

use crate::node::Node;
use serde::{Deserialize, Serialize};

/// Outcome of resolving a free-text query against the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchResult {
    /// A single resolved node
    Node { node: Node },

    /// Two nodes known to share an edge
    Pairing { source: Node, target: Node },

    /// Several resolved nodes, in answer order
    NodeSet { nodes: Vec<Node> },

    /// Nothing resolved; the query is handed back unchanged
    Prompt { query: String },
}

impl SearchResult {
    pub fn node(node: Node) -> Self {
        Self::Node { node }
    }

    pub fn pairing(source: Node, target: Node) -> Self {
        Self::Pairing { source, target }
    }

    pub fn node_set(nodes: Vec<Node>) -> Self {
        Self::NodeSet { nodes }
    }

    pub fn prompt(query: impl Into<String>) -> Self {
        Self::Prompt {
            query: query.into(),
        }
    }

    /// Every node the result selects, in order
    pub fn selected(&self) -> Vec<&Node> {
        match self {
            Self::Node { node } => vec![node],
            Self::Pairing { source, target } => vec![source, target],
            Self::NodeSet { nodes } => nodes.iter().collect(),
            Self::Prompt { .. } => Vec::new(),
        }
    }

    pub fn is_prompt(&self) -> bool {
        matches!(self, Self::Prompt { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Node { .. } => "node",
            Self::Pairing { .. } => "pairing",
            Self::NodeSet { .. } => "node_set",
            Self::Prompt { .. } => "prompt",
        }
    }
}
