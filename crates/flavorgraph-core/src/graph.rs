//! Pairing graph: immutable nodes and edges with an adjacency index

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::category::Category;
use crate::edge::{Edge, Strength};
use crate::error::{Error, Result};
use crate::node::{Node, NodeId};

/// Nodes and edges for one session
///
/// Built once from the dataset and never mutated. Node order is the order
/// the supplier gave, which matchers treat as the natural tie-break order.
#[derive(Debug, Clone, Default)]
pub struct PairingGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: HashMap<NodeId, usize>,
    adjacency: HashMap<NodeId, Vec<usize>>,
}

impl PairingGraph {
    /// Build a graph, rejecting duplicate node ids
    ///
    /// Edges whose endpoints are unknown, and self-loops, are dropped.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(Error::DuplicateNode(node.id.to_string()));
            }
        }

        let mut kept = Vec::with_capacity(edges.len());
        let mut dropped = 0usize;
        for edge in edges {
            if edge.source == edge.target
                || !index.contains_key(&edge.source)
                || !index.contains_key(&edge.target)
            {
                dropped += 1;
                continue;
            }
            kept.push(edge);
        }
        if dropped > 0 {
            tracing::warn!("Dropped {} edges with unknown or identical endpoints", dropped);
        }

        let mut adjacency: HashMap<NodeId, Vec<usize>> = HashMap::new();
        for (i, edge) in kept.iter().enumerate() {
            adjacency.entry(edge.source.clone()).or_default().push(i);
            adjacency.entry(edge.target.clone()).or_default().push(i);
        }

        tracing::debug!(
            "Built pairing graph with {} nodes and {} edges",
            nodes.len(),
            kept.len()
        );

        Ok(Self {
            nodes,
            edges: kept,
            index,
            adjacency,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Look a node up by id, ignoring case
    pub fn node_by_id_ignore_case(&self, id: &str) -> Option<&Node> {
        let wanted = id.trim().to_lowercase();
        self.node(&NodeId::new(id.trim())).or_else(|| {
            self.nodes
                .iter()
                .find(|n| n.id.as_str().to_lowercase() == wanted)
        })
    }

    /// Strongest edge joining `a` and `b`, if any
    pub fn edge_between(&self, a: &NodeId, b: &NodeId) -> Option<&Edge> {
        self.adjacency
            .get(a)?
            .iter()
            .map(|&i| &self.edges[i])
            .filter(|e| e.connects(a, b))
            .max_by_key(|e| e.strength)
    }

    pub fn has_edge(&self, a: &NodeId, b: &NodeId) -> bool {
        self.edge_between(a, b).is_some()
    }

    /// Nodes paired with `id`, strongest first, then by name
    pub fn neighbors(&self, id: &NodeId, min_strength: Strength) -> Vec<(&Node, Strength)> {
        let Some(edge_ids) = self.adjacency.get(id) else {
            return Vec::new();
        };

        // An unordered pair may appear more than once; keep its strongest edge.
        let mut best: HashMap<&NodeId, Strength> = HashMap::new();
        for &i in edge_ids {
            let edge = &self.edges[i];
            if edge.strength < min_strength {
                continue;
            }
            if let Some(other) = edge.other(id) {
                let entry = best.entry(other).or_insert(edge.strength);
                if edge.strength > *entry {
                    *entry = edge.strength;
                }
            }
        }

        let mut result: Vec<(&Node, Strength)> = best
            .into_iter()
            .filter_map(|(other, strength)| self.node(other).map(|n| (n, strength)))
            .collect();
        result.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(&b.0.name)));
        result
    }

    /// Holy grail pairings rendered as `"a + b"` hint strings
    ///
    /// With `focus` set, only pairings touching that node are returned.
    pub fn holy_grail_hints(&self, focus: Option<&NodeId>, limit: usize) -> Vec<String> {
        self.edges
            .iter()
            .filter(|e| e.is_holy_grail())
            .filter(|e| focus.map_or(true, |f| &e.source == f || &e.target == f))
            .filter_map(|e| {
                let source = self.node(&e.source)?;
                let target = self.node(&e.target)?;
                Some(format!("{} + {}", source.name, target.name))
            })
            .take(limit)
            .collect()
    }

    /// Subgraph keeping nodes in `categories` and the edges among them
    pub fn filter_categories(&self, categories: &[Category]) -> PairingGraph {
        let nodes: Vec<Node> = self
            .nodes
            .iter()
            .filter(|n| n.in_categories(categories))
            .cloned()
            .collect();
        let kept: HashSet<&NodeId> = nodes.iter().map(|n| &n.id).collect();
        let edges: Vec<Edge> = self
            .edges
            .iter()
            .filter(|e| kept.contains(&e.source) && kept.contains(&e.target))
            .cloned()
            .collect();

        // Ids were unique in self, so they are unique in any subset.
        match PairingGraph::new(nodes, edges) {
            Ok(graph) => graph,
            Err(_) => PairingGraph::default(),
        }
    }

    /// Node count per category; uncategorised nodes count as `other`
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for node in &self.nodes {
            *counts
                .entry(node.category.unwrap_or(Category::Other))
                .or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> PairingGraph {
        let nodes = vec![
            Node::new("tomato", "tomato").with_category(Category::Vegetables),
            Node::new("basil", "basil").with_category(Category::HerbsSpices),
            Node::new("mozzarella", "mozzarella").with_category(Category::DairyCheese),
            Node::new("garlic", "garlic").with_category(Category::Vegetables),
        ];
        let edges = vec![
            Edge::new("tomato", "basil", Strength::RECOMMENDED),
            Edge::new("basil", "tomato", Strength::HOLY_GRAIL),
            Edge::new("tomato", "mozzarella", Strength::HIGHLY_RECOMMENDED),
            Edge::new("tomato", "garlic", Strength::SUGGESTED),
            Edge::new("tomato", "ghost", Strength::SUGGESTED),
        ];
        PairingGraph::new(nodes, edges).unwrap()
    }

    #[test]
    fn test_dangling_edges_dropped() {
        let graph = sample_graph();
        assert_eq!(graph.edges().len(), 4);
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let nodes = vec![Node::new("a", "a"), Node::new("a", "again")];
        assert!(matches!(
            PairingGraph::new(nodes, vec![]),
            Err(Error::DuplicateNode(_))
        ));
    }

    #[test]
    fn test_edge_lookup_is_undirected() {
        let graph = sample_graph();
        let tomato = NodeId::new("tomato");
        let basil = NodeId::new("basil");

        assert!(graph.has_edge(&basil, &tomato));
        assert_eq!(
            graph.edge_between(&tomato, &basil).map(|e| e.strength),
            Some(Strength::HOLY_GRAIL)
        );
        assert!(!graph.has_edge(&basil, &NodeId::new("mozzarella")));
    }

    #[test]
    fn test_neighbors_sorted_by_strength() {
        let graph = sample_graph();
        let neighbors = graph.neighbors(&NodeId::new("tomato"), Strength::SUGGESTED);
        let names: Vec<&str> = neighbors.iter().map(|(n, _)| n.name.as_str()).collect();
        assert_eq!(names, vec!["basil", "mozzarella", "garlic"]);

        let strong = graph.neighbors(&NodeId::new("tomato"), Strength::HIGHLY_RECOMMENDED);
        assert_eq!(strong.len(), 2);
    }

    #[test]
    fn test_holy_grail_hints() {
        let graph = sample_graph();
        assert_eq!(graph.holy_grail_hints(None, 10), vec!["basil + tomato"]);
        assert!(graph
            .holy_grail_hints(Some(&NodeId::new("garlic")), 10)
            .is_empty());
    }

    #[test]
    fn test_filter_categories() {
        let graph = sample_graph();
        let veg = graph.filter_categories(&[Category::Vegetables]);
        assert_eq!(veg.nodes().len(), 2);
        assert_eq!(veg.edges().len(), 1);
        assert!(veg.node(&NodeId::new("basil")).is_none());
    }

    #[test]
    fn test_category_counts() {
        let counts = sample_graph().category_counts();
        assert_eq!(counts.get(&Category::Vegetables), Some(&2));
        assert_eq!(counts.get(&Category::Seafood), None);
    }
}
