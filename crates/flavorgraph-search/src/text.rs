//! Permissive text-to-node matching for provider answers
//!
//! Provider output is noisy ("Fresh basil leaves.", "\"mozzarella\""), so
//! these heuristics accept more than the [`LocalMatcher`](crate::LocalMatcher)
//! does. They never invent nodes: every hit is a member of the supplied set.

use std::collections::HashSet;

use flavorgraph_core::Node;

/// Words shorter than this are ignored by the overlap heuristics
const MIN_OVERLAP_WORD_LEN: usize = 3;

/// Lowercased alphanumeric words of `text`
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

fn overlap_words(text: &str) -> HashSet<String> {
    words(text)
        .filter(|w| w.chars().count() >= MIN_OVERLAP_WORD_LEN)
        .collect()
}

/// Heuristic matcher for one free-text answer (stateless)
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMatcher;

impl TextMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `text` to a node, trying in order:
    ///
    /// 1. exact name
    /// 2. a node name contained in the text (longest name wins)
    /// 3. the text contained in a node name
    /// 4. a shared word of three or more characters
    pub fn match_text<'a>(text: &str, nodes: &'a [Node]) -> Option<&'a Node> {
        let text = text
            .trim()
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if text.is_empty() {
            return None;
        }

        if let Some(node) = nodes.iter().find(|n| n.normalized_name() == text) {
            return Some(node);
        }

        let mut contained: Option<(usize, &'a Node)> = None;
        for node in nodes {
            let name = node.normalized_name();
            if name.is_empty() || !text.contains(&name) {
                continue;
            }
            let len = name.chars().count();
            if contained.map_or(true, |(best, _)| len > best) {
                contained = Some((len, node));
            }
        }
        if let Some((_, node)) = contained {
            return Some(node);
        }

        if let Some(node) = nodes.iter().find(|n| n.normalized_name().contains(&text)) {
            return Some(node);
        }

        let text_words = overlap_words(&text);
        if text_words.is_empty() {
            return None;
        }
        nodes.iter().find(|n| {
            words(&n.name)
                .filter(|w| w.chars().count() >= MIN_OVERLAP_WORD_LEN)
                .any(|w| text_words.contains(&w))
        })
    }

    /// Nodes whose names share words with any of `texts`
    ///
    /// Ranked by the number of shared words, ties in supplied order. When at
    /// least one node scores, the list is padded with the remaining nodes in
    /// supplied order up to `limit`. Returns an empty list when nothing
    /// scores, since an arbitrary list gives a picker nothing to go on.
    pub fn candidate_nodes<'a>(texts: &[&str], nodes: &'a [Node], limit: usize) -> Vec<&'a Node> {
        let vocabulary: HashSet<String> = texts.iter().flat_map(|t| overlap_words(t)).collect();
        if vocabulary.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, usize)> = nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| {
                let score = overlap_words(&node.name)
                    .iter()
                    .filter(|w| vocabulary.contains(*w))
                    .count();
                (score > 0).then_some((i, score))
            })
            .collect();
        if scored.is_empty() {
            return Vec::new();
        }
        scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(limit);

        let chosen: HashSet<usize> = scored.iter().map(|(i, _)| *i).collect();
        let mut candidates: Vec<&'a Node> = scored.iter().map(|(i, _)| &nodes[*i]).collect();
        candidates.extend(
            nodes
                .iter()
                .enumerate()
                .filter(|(i, _)| !chosen.contains(i))
                .map(|(_, n)| n)
                .take(limit - candidates.len()),
        );
        candidates
    }
}
