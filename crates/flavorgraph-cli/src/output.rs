//! Output formatting utilities

use serde::Serialize;

use flavorgraph_core::{Node, PairingGraph, Recipe, SearchResult, Strength};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

pub fn to_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

fn node_line(node: &Node) -> String {
    match node.category {
        Some(category) => format!("{} [{}]", node.name, category.label()),
        None => node.name.clone(),
    }
}

/// Render a search result
pub fn format_result(result: &SearchResult, graph: &PairingGraph, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return to_json(result);
    }

    match result {
        SearchResult::Node { node } => node_line(node),
        SearchResult::Pairing { source, target } => {
            let strength = graph
                .edge_between(&source.id, &target.id)
                .map(|e| format!(" ({})", e.strength.label()))
                .unwrap_or_default();
            format!("{} + {}{}", source.name, target.name, strength)
        }
        SearchResult::NodeSet { nodes } => nodes
            .iter()
            .map(|n| format!("  {}", node_line(n)))
            .collect::<Vec<_>>()
            .join("\n"),
        SearchResult::Prompt { query } if query.trim().is_empty() => {
            "Type an ingredient or a question to search".to_string()
        }
        SearchResult::Prompt { query } => {
            format!("No ingredient found for '{}'. Try rephrasing.", query.trim())
        }
    }
}

/// Render a plain node list
pub fn format_nodes(nodes: &[&Node], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&nodes),
        OutputFormat::Table => nodes
            .iter()
            .map(|n| format!("  {}", node_line(n)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

#[derive(Serialize)]
struct PairingRow<'a> {
    id: &'a str,
    name: &'a str,
    strength: u8,
}

/// Render the neighbors of a node
pub fn format_pairings(focus: &Node, pairings: &[(&Node, Strength)], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let rows: Vec<PairingRow> = pairings
                .iter()
                .map(|(n, s)| PairingRow {
                    id: n.id.as_str(),
                    name: &n.name,
                    strength: s.value(),
                })
                .collect();
            to_json(&rows)
        }
        OutputFormat::Table => {
            let mut out = format!("{} pairs with ({}):", focus.name, pairings.len());
            for (node, strength) in pairings {
                out.push_str(&format!("\n  {:<4} {}", "*".repeat(strength.value() as usize), node.name));
            }
            out
        }
    }
}

/// Render recipes
pub fn format_recipes(recipes: &[Recipe], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&recipes),
        OutputFormat::Table => recipes
            .iter()
            .map(|r| {
                let ingredients: Vec<&str> = r.ingredients.iter().map(|i| i.as_str()).collect();
                format!("  {}  {} ({})", r.id, r.name, ingredients.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
