//! Fuzzy suggestions using nucleo

use nucleo_matcher::{
    pattern::{AtomKind, CaseMatching, Normalization, Pattern},
    Config, Matcher,
};

use crate::traits::NodeMatcher;
use flavorgraph_core::Node;

/// Stateless fuzzy suggester for autocomplete
///
/// Scores node names as subsequence matches, so abbreviated input like
/// "tmto" still finds "tomato".
pub struct FuzzySuggester {
    pub min_score: u32,
}

impl FuzzySuggester {
    pub fn new() -> Self {
        Self { min_score: 0 }
    }

    pub fn with_min_score(mut self, min_score: u32) -> Self {
        self.min_score = min_score;
        self
    }

    fn score_node(node: &Node, pattern: &Pattern, matcher: &mut Matcher) -> Option<u32> {
        let mut buf = Vec::new();
        pattern.score(nucleo_matcher::Utf32Str::new(&node.name, &mut buf), matcher)
    }

    pub fn suggest<'a>(&self, query: &str, nodes: &'a [Node], limit: usize) -> Vec<&'a Node> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let pattern = Pattern::new(
            query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let mut matcher = Matcher::new(Config::DEFAULT);

        let mut scored: Vec<(&'a Node, u32)> = nodes
            .iter()
            .filter_map(|n| Self::score_node(n, &pattern, &mut matcher).map(|s| (n, s)))
            .filter(|(_, s)| *s >= self.min_score)
            .collect();

        // Stable sort keeps supplied order on ties
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        scored.into_iter().take(limit).map(|(n, _)| n).collect()
    }
}

impl Default for FuzzySuggester {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeMatcher for FuzzySuggester {
    fn search<'a>(&self, query: &str, nodes: &'a [Node], limit: usize) -> Vec<&'a Node> {
        self.suggest(query, nodes, limit)
    }
}
