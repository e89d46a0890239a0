//! Matcher traits

use flavorgraph_core::Node;

/// Ranked lookup of nodes for a text query
///
/// Matchers are stateless: the node set is passed on every call and results
/// borrow from it.
pub trait NodeMatcher: Send + Sync {
    /// Up to `limit` nodes matching `query`, best first
    fn search<'a>(&self, query: &str, nodes: &'a [Node], limit: usize) -> Vec<&'a Node>;
}
