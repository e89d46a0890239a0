//! Dataset loading
//!
//! Reads the `{nodes, edges, metadata}` JSON document produced by the data
//! pipeline. Nodes carry an `id` and a `label` (or `name`); edges carry
//! `source`, `target` and a 1-4 `weight` (older documents call it
//! `recommendation_level`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::edge::{Edge, Strength};
use crate::error::{Error, Result};
use crate::graph::PairingGraph;
use crate::node::{Node, NodeId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetEdge {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_level: Option<u8>,
    #[serde(default)]
    pub from_affinity: bool,
}

/// The raw dataset document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub nodes: Vec<DatasetNode>,
    #[serde(default)]
    pub edges: Vec<DatasetEdge>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Dataset {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let dataset = Self::from_json_str(&raw)
            .map_err(|e| Error::Dataset(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(
            "Loaded dataset {:?}: {} nodes, {} edges",
            path,
            dataset.nodes.len(),
            dataset.edges.len()
        );
        Ok(dataset)
    }

    /// Convert into a validated [`PairingGraph`]
    pub fn into_graph(self) -> Result<PairingGraph> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|raw| {
                let name = raw.name.or(raw.label).unwrap_or_else(|| raw.id.clone());
                Node {
                    id: NodeId(raw.id),
                    name,
                    category: raw.category,
                    group: raw.group,
                    image: raw.image,
                }
            })
            .collect();

        let mut edges = Vec::with_capacity(self.edges.len());
        for raw in self.edges {
            let level = raw.weight.or(raw.recommendation_level).unwrap_or(1);
            let strength = Strength::new(level).map_err(|_| Error::InvalidStrength {
                source_id: raw.source.clone(),
                target_id: raw.target.clone(),
                strength: level,
            })?;
            let mut edge = Edge::new(raw.source, raw.target, strength);
            edge.from_affinity = raw.from_affinity;
            edges.push(edge);
        }

        PairingGraph::new(nodes, edges)
    }
}
