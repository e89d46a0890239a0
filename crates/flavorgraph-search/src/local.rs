//! Local matcher - exact, prefix and substring matching on node names

use flavorgraph_core::Node;

use crate::traits::NodeMatcher;

/// Match quality, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    /// Name equals the query
    Exact,
    /// Name starts with the query
    Prefix,
    /// Name contains the query
    Contains,
}

impl MatchTier {
    /// Tier of `name` against `query`; both must already be lowercased
    pub fn classify(name: &str, query: &str) -> Option<Self> {
        if name == query {
            Some(Self::Exact)
        } else if name.starts_with(query) {
            Some(Self::Prefix)
        } else if name.contains(query) {
            Some(Self::Contains)
        } else {
            None
        }
    }
}

/// Deterministic, case-insensitive name matcher (stateless)
///
/// The first tier with any hit wins. Within a tier the node that comes
/// first in the supplied order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMatcher;

impl LocalMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Best single match for `query`, or `None`
    pub fn match_one<'a>(query: &str, nodes: &'a [Node]) -> Option<&'a Node> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        let mut best: Option<(MatchTier, &'a Node)> = None;
        for node in nodes {
            let Some(tier) = MatchTier::classify(&node.normalized_name(), &query) else {
                continue;
            };
            if tier == MatchTier::Exact {
                return Some(node);
            }
            if best.map_or(true, |(current, _)| tier < current) {
                best = Some((tier, node));
            }
        }

        best.map(|(_, node)| node)
    }

    /// All matches for `query`, exact first, then prefix, then substring
    pub fn match_many<'a>(query: &str, nodes: &'a [Node], limit: usize) -> Vec<&'a Node> {
        let query = query.trim().to_lowercase();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut exact = Vec::new();
        let mut prefix = Vec::new();
        let mut contains = Vec::new();
        for node in nodes {
            match MatchTier::classify(&node.normalized_name(), &query) {
                Some(MatchTier::Exact) => exact.push(node),
                Some(MatchTier::Prefix) => prefix.push(node),
                Some(MatchTier::Contains) => contains.push(node),
                None => {}
            }
        }

        exact
            .into_iter()
            .chain(prefix)
            .chain(contains)
            .take(limit)
            .collect()
    }
}

impl NodeMatcher for LocalMatcher {
    fn search<'a>(&self, query: &str, nodes: &'a [Node], limit: usize) -> Vec<&'a Node> {
        Self::match_many(query, nodes, limit)
    }
}
