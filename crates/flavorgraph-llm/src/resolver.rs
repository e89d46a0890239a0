//! Query resolution with provider fallback
//!
//! Order of attempts for one query:
//!
//! 1. blank query: prompt result, no provider call
//! 2. local name match: node result, no provider call
//! 3. provider answer in the provider's declared format, matched back to nodes
//! 4. one re-prompt with a bounded candidate list when nothing matched
//!
//! A single resolved node is upgraded to a pairing when the query itself
//! names a different ingredient and the two share an edge.

use std::collections::HashSet;
use std::sync::Arc;

use flavorgraph_core::limits::MAX_REPROMPT_CANDIDATES;
use flavorgraph_core::{Node, PairingGraph, SearchResult};
use flavorgraph_search::{LocalMatcher, QueryDecomposer, TextMatcher};

use crate::error::ProviderResult;
use crate::parse::{parse_json_answer, parse_pick, pipe_parts};
use crate::prompt::{json_object_prompt, pick_prompt, pipe_list_prompt};
use crate::provider::{ResponseFormat, TextProvider};

/// Turns free-text questions into graph selections
pub struct Resolver {
    provider: Arc<dyn TextProvider>,
}

impl Resolver {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Holy grail hints for `query`: pairings of the ingredient it names,
    /// or any holy grail pairings when it names none
    pub fn hints_for(query: &str, graph: &PairingGraph, limit: usize) -> Vec<String> {
        let focused = QueryDecomposer::extract_ingredient(query, graph.nodes())
            .map(|node| graph.holy_grail_hints(Some(&node.id), limit))
            .unwrap_or_default();
        if focused.is_empty() {
            graph.holy_grail_hints(None, limit)
        } else {
            focused
        }
    }

    /// Resolve `query` against `graph`
    ///
    /// Makes at most two provider calls. Provider errors are returned as-is;
    /// an answer that names nothing in the graph is a prompt result.
    pub async fn resolve(
        &self,
        query: &str,
        graph: &PairingGraph,
        hints: &[String],
    ) -> ProviderResult<SearchResult> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(SearchResult::prompt(""));
        }

        let nodes = graph.nodes();
        if let Some(hit) = LocalMatcher::match_one(trimmed, nodes) {
            tracing::debug!("Local match for {:?}: {}", trimmed, hit.id);
            return Ok(SearchResult::node(hit.clone()));
        }

        let format = self.provider.response_format();
        let prompt = match format {
            ResponseFormat::PipeList => pipe_list_prompt(trimmed, hints),
            ResponseFormat::JsonObject => json_object_prompt(trimmed, hints),
        };

        tracing::info!(provider = self.provider.name(), "No local match; asking provider");
        let answer = self.provider.complete(&prompt).await?;
        tracing::debug!("Provider answered {:?}", answer);

        let mut resolved = match format {
            ResponseFormat::PipeList => resolve_pipe_list(&answer, nodes),
            ResponseFormat::JsonObject => resolve_json_object(&answer, graph).into_iter().collect(),
        };

        if resolved.is_empty() {
            // Score JSON answers by their name only, not their keys and labels
            let named = match format {
                ResponseFormat::PipeList => None,
                ResponseFormat::JsonObject => parse_json_answer(&answer).map(|a| a.name),
            };
            let overlap_text = named.as_deref().unwrap_or(&answer);
            if let Some(node) = self.repick(trimmed, &answer, overlap_text, nodes).await? {
                resolved.push(node);
            }
        }

        let result = match resolved.as_slice() {
            [] => SearchResult::prompt(query),
            [single] => upgrade_to_pairing(trimmed, single, graph),
            many => SearchResult::node_set(many.iter().map(|n| (*n).clone()).collect()),
        };
        tracing::info!(kind = result.kind(), "Resolved query");
        Ok(result)
    }

    /// Second and final provider call: choose from nodes resembling the
    /// answer or the query
    async fn repick<'a>(
        &self,
        query: &str,
        answer: &str,
        overlap_text: &str,
        nodes: &'a [Node],
    ) -> ProviderResult<Option<&'a Node>> {
        let candidates =
            TextMatcher::candidate_nodes(&[overlap_text, query], nodes, MAX_REPROMPT_CANDIDATES);
        if candidates.is_empty() {
            tracing::debug!("No candidates resemble the answer; skipping re-prompt");
            return Ok(None);
        }

        tracing::info!(
            provider = self.provider.name(),
            candidates = candidates.len(),
            "Re-prompting with candidate list"
        );
        let reply = self
            .provider
            .complete(&pick_prompt(query, answer, &candidates))
            .await?;

        let Some(pick) = parse_pick(&reply) else {
            return Ok(None);
        };
        Ok(find_pick(&pick, &candidates))
    }
}

/// Candidate named by a re-prompt pick
///
/// Providers often copy a whole `id: name` candidate line back, so when the
/// full pick names nothing, the text before the first `": "` is tried as an
/// id and the text after it as a name.
fn find_pick<'a>(pick: &str, candidates: &[&'a Node]) -> Option<&'a Node> {
    let by_id = |id: &str| {
        let id = id.trim().to_lowercase();
        candidates
            .iter()
            .find(|n| n.id.as_str().to_lowercase() == id)
            .copied()
    };
    let by_name = |name: &str| {
        let name = name.trim().to_lowercase();
        candidates
            .iter()
            .find(|n| n.normalized_name() == name)
            .copied()
    };

    by_id(pick).or_else(|| by_name(pick)).or_else(|| {
        let (id, name) = pick.split_once(": ")?;
        by_id(id).or_else(|| by_name(name))
    })
}

fn resolve_pipe_list<'a>(answer: &str, nodes: &'a [Node]) -> Vec<&'a Node> {
    let mut seen = HashSet::new();
    pipe_parts(answer)
        .iter()
        .filter_map(|part| {
            let node = TextMatcher::match_text(part, nodes);
            if node.is_none() {
                tracing::debug!("Answer item {:?} names no node", part);
            }
            node
        })
        .filter(|node| seen.insert(node.id.clone()))
        .collect()
}

fn resolve_json_object<'a>(answer: &str, graph: &'a PairingGraph) -> Option<&'a Node> {
    let parsed = parse_json_answer(answer)?;
    if let Some(node) = graph.node_by_id_ignore_case(&parsed.id) {
        return Some(node);
    }

    let name = parsed.name.trim().to_lowercase();
    graph
        .nodes()
        .iter()
        .find(|n| n.normalized_name() == name)
        .or_else(|| TextMatcher::match_text(&parsed.name, graph.nodes()))
}

fn upgrade_to_pairing(query: &str, resolved: &Node, graph: &PairingGraph) -> SearchResult {
    if let Some(focus) = QueryDecomposer::extract_ingredient(query, graph.nodes()) {
        if focus.id != resolved.id && graph.has_edge(&focus.id, &resolved.id) {
            return SearchResult::pairing(focus.clone(), resolved.clone());
        }
    }
    SearchResult::node(resolved.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use flavorgraph_core::{Edge, Strength};

    use crate::error::ProviderError;

    /// Provider replaying scripted replies and recording prompts
    struct StubProvider {
        format: ResponseFormat,
        replies: Mutex<VecDeque<ProviderResult<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn new(format: ResponseFormat, replies: Vec<ProviderResult<String>>) -> Arc<Self> {
            Arc::new(Self {
                format,
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn pipe(replies: &[&str]) -> Arc<Self> {
            Self::new(
                ResponseFormat::PipeList,
                replies.iter().map(|r| Ok(r.to_string())).collect(),
            )
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }

        fn prompt(&self, i: usize) -> String {
            self.prompts.lock().unwrap()[i].clone()
        }
    }

    #[async_trait]
    impl TextProvider for StubProvider {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn response_format(&self) -> ResponseFormat {
            self.format
        }

        async fn complete(&self, prompt: &str) -> ProviderResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::InvalidResponse("no scripted reply".into())))
        }
    }

    fn caprese(with_edge: bool) -> PairingGraph {
        let nodes = vec![
            Node::new("tomato", "tomato"),
            Node::new("basil", "basil"),
            Node::new("mozzarella", "mozzarella"),
        ];
        let edges = if with_edge {
            vec![Edge::new("tomato", "basil", Strength::RECOMMENDED)]
        } else {
            Vec::new()
        };
        PairingGraph::new(nodes, edges).unwrap()
    }

    fn peppers(count: usize) -> PairingGraph {
        let nodes = (0..count)
            .map(|i| {
                let name = format!("pepper {}", i);
                Node::new(name.as_str(), name.as_str())
            })
            .collect();
        PairingGraph::new(nodes, Vec::new()).unwrap()
    }

    #[tokio::test]
    async fn test_exact_name_skips_provider() {
        let stub = StubProvider::pipe(&[]);
        let resolver = Resolver::new(stub.clone());

        let result = resolver.resolve("TOMATO", &caprese(true), &[]).await.unwrap();

        assert_eq!(result, SearchResult::node(Node::new("tomato", "tomato")));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_query_is_empty_prompt() {
        let stub = StubProvider::pipe(&[]);
        let resolver = Resolver::new(stub.clone());

        for query in ["", "   ", "\t\n"] {
            let result = resolver.resolve(query, &caprese(true), &[]).await.unwrap();
            assert_eq!(result, SearchResult::prompt(""));
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_single_answer_upgrades_to_pairing() {
        let stub = StubProvider::pipe(&["basil"]);
        let resolver = Resolver::new(stub.clone());

        let result = resolver
            .resolve("what goes with tomato", &caprese(true), &[])
            .await
            .unwrap();

        assert_eq!(
            result,
            SearchResult::pairing(Node::new("tomato", "tomato"), Node::new("basil", "basil"))
        );
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_no_pairing_without_edge() {
        let stub = StubProvider::pipe(&["basil"]);
        let resolver = Resolver::new(stub);

        let result = resolver
            .resolve("what goes with tomato", &caprese(false), &[])
            .await
            .unwrap();

        assert_eq!(result, SearchResult::node(Node::new("basil", "basil")));
    }

    #[tokio::test]
    async fn test_multiple_answers_give_node_set() {
        let stub = StubProvider::pipe(&["Fresh basil | \"mozzarella\" | basil"]);
        let resolver = Resolver::new(stub);

        let result = resolver
            .resolve("something for a caprese", &caprese(true), &[])
            .await
            .unwrap();

        assert_eq!(
            result,
            SearchResult::node_set(vec![
                Node::new("basil", "basil"),
                Node::new("mozzarella", "mozzarella"),
            ])
        );
    }

    #[tokio::test]
    async fn test_json_answer_resolves_by_id() {
        let stub = StubProvider::new(
            ResponseFormat::JsonObject,
            vec![Ok(
                "```json\n{\"id\": \"Basil\", \"name\": \"Sweet basil\", \"category\": \"herbs_spices\"}\n```"
                    .to_string(),
            )],
        );
        let resolver = Resolver::new(stub.clone());

        let result = resolver
            .resolve("what goes with tomato", &caprese(true), &[])
            .await
            .unwrap();

        assert_eq!(
            result,
            SearchResult::pairing(Node::new("tomato", "tomato"), Node::new("basil", "basil"))
        );
        assert!(stub.prompt(0).contains("JSON"));
    }

    #[tokio::test]
    async fn test_hints_reach_prompt() {
        let stub = StubProvider::pipe(&["basil"]);
        let resolver = Resolver::new(stub.clone());
        let hints = vec!["tomato + basil".to_string()];

        resolver
            .resolve("what goes with tomato", &caprese(true), &hints)
            .await
            .unwrap();

        assert!(stub.prompt(0).contains("tomato + basil"));
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let stub = StubProvider::pipe(&["basil", "basil"]);
        let resolver = Resolver::new(stub);
        let graph = caprese(true);

        let first = resolver.resolve("what goes with tomato", &graph, &[]).await.unwrap();
        let second = resolver.resolve("what goes with tomato", &graph, &[]).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_reprompt_candidates_are_bounded() {
        let stub = StubProvider::pipe(&["unknowable", "pepper 7"]);
        let resolver = Resolver::new(stub.clone());

        let result = resolver
            .resolve("spicy pepper dish", &peppers(40), &[])
            .await
            .unwrap();

        assert_eq!(result, SearchResult::node(Node::new("pepper 7", "pepper 7")));
        assert_eq!(stub.calls(), 2);
        let listed = stub
            .prompt(1)
            .lines()
            .filter(|l| l.starts_with("- "))
            .count();
        assert_eq!(listed, MAX_REPROMPT_CANDIDATES);
    }

    #[tokio::test]
    async fn test_reprompt_accepts_copied_candidate_line() {
        let stub = StubProvider::pipe(&["unknowable", "- pepper 7: pepper 7"]);
        let resolver = Resolver::new(stub.clone());

        let result = resolver
            .resolve("spicy pepper dish", &peppers(40), &[])
            .await
            .unwrap();

        assert_eq!(result, SearchResult::node(Node::new("pepper 7", "pepper 7")));
        assert_eq!(stub.calls(), 2);
    }

    #[test]
    fn test_find_pick_prefers_full_name() {
        let blue = Node::new("blue-cheese", "cheese: blue");
        let cheese = Node::new("cheese", "cheese");
        let candidates = vec![&blue, &cheese];

        assert_eq!(find_pick("cheese: blue", &candidates).map(|n| n.id.as_str()), Some("blue-cheese"));
        assert_eq!(find_pick("Cheese: whatever", &candidates).map(|n| n.id.as_str()), Some("cheese"));
        assert_eq!(find_pick("nothing: here", &candidates), None);
    }

    #[tokio::test]
    async fn test_json_keys_do_not_create_candidates() {
        let nodes = vec![
            Node::new("herbes", "herbs de provence"),
            Node::new("name-day-cake", "name day cake"),
        ];
        let graph = PairingGraph::new(nodes, Vec::new()).unwrap();
        let stub = StubProvider::new(
            ResponseFormat::JsonObject,
            vec![Ok("{\"id\": \"x1\", \"name\": \"zzz\", \"category\": \"herbs\"}".to_string())],
        );
        let resolver = Resolver::new(stub.clone());

        let result = resolver.resolve("qqq", &graph, &[]).await.unwrap();

        assert_eq!(result, SearchResult::prompt("qqq"));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_reprompt_pick_outside_candidates_is_prompt() {
        let stub = StubProvider::pipe(&["unknowable", "pepper 30"]);
        let resolver = Resolver::new(stub.clone());

        let result = resolver
            .resolve("spicy pepper dish", &peppers(40), &[])
            .await
            .unwrap();

        assert_eq!(result, SearchResult::prompt("spicy pepper dish"));
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn test_no_reprompt_without_candidates() {
        let stub = StubProvider::pipe(&["zzz"]);
        let resolver = Resolver::new(stub.clone());

        let result = resolver
            .resolve(" qqq xyz ", &caprese(true), &[])
            .await
            .unwrap();

        assert_eq!(result, SearchResult::prompt(" qqq xyz "));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let stub = StubProvider::new(
            ResponseFormat::PipeList,
            vec![Err(ProviderError::MissingCredentials {
                provider: "stub",
                what: "API key",
            })],
        );
        let resolver = Resolver::new(stub);

        let err = resolver
            .resolve("what goes with tomato", &caprese(true), &[])
            .await
            .unwrap_err();

        assert!(err.is_missing_credentials());
    }

    #[test]
    fn test_hints_for_focus() {
        let nodes = vec![
            Node::new("tomato", "tomato"),
            Node::new("basil", "basil"),
            Node::new("lemon", "lemon"),
            Node::new("thyme", "thyme"),
        ];
        let edges = vec![
            Edge::new("tomato", "basil", Strength::HOLY_GRAIL),
            Edge::new("lemon", "thyme", Strength::HOLY_GRAIL),
        ];
        let graph = PairingGraph::new(nodes, edges).unwrap();

        assert_eq!(
            Resolver::hints_for("what goes with tomato", &graph, 10),
            vec!["tomato + basil"]
        );
        assert_eq!(Resolver::hints_for("surprise us", &graph, 10).len(), 2);
    }
}
