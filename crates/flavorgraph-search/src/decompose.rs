//! Query decomposer - finds the ingredient a sentence is about

use flavorgraph_core::limits::{MAX_PHRASE_TOKENS, MIN_TOKEN_LEN};
use flavorgraph_core::Node;

use crate::local::LocalMatcher;

/// Greedy longest-phrase-first ingredient extraction (stateless)
///
/// "what pairs with dark chocolate" tries every 3-token window, then every
/// 2-token window, then single tokens, and returns the first phrase the
/// [`LocalMatcher`] resolves. Longer phrases go first so "dark chocolate"
/// wins over "chocolate".
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryDecomposer;

impl QueryDecomposer {
    pub fn new() -> Self {
        Self
    }

    /// Lowercased, punctuation-free tokens of at least two characters
    pub fn tokenize(query: &str) -> Vec<String> {
        // Punctuation splits words: "tomato's" keeps "tomato", "sun-dried" is two tokens
        let cleaned: String = query
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();

        cleaned
            .split_whitespace()
            .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
            .map(str::to_string)
            .collect()
    }

    /// Candidate phrases, longest first, left to right within a length
    pub fn phrases(tokens: &[String]) -> Vec<String> {
        let mut phrases = Vec::new();
        for len in (1..=MAX_PHRASE_TOKENS.min(tokens.len())).rev() {
            for window in tokens.windows(len) {
                phrases.push(window.join(" "));
            }
        }
        phrases
    }

    pub fn extract_ingredient<'a>(query: &str, nodes: &'a [Node]) -> Option<&'a Node> {
        let tokens = Self::tokenize(query);
        for phrase in Self::phrases(&tokens) {
            if let Some(node) = LocalMatcher::match_one(&phrase, nodes) {
                tracing::debug!("Decomposed {:?} to {} via {:?}", query, node.id, phrase);
                return Some(node);
            }
        }
        None
    }
}
