//! Pairings command

use clap::Args;

use crate::output::format_pairings;
use crate::{AppContext, Cli};
use flavorgraph_core::{Category, Strength};
use flavorgraph_search::LocalMatcher;

#[derive(Args)]
pub struct PairingsArgs {
    /// Ingredient name
    pub ingredient: String,

    /// Minimum pairing strength (1-4)
    #[arg(short = 's', long, default_value = "1")]
    pub min_strength: u8,

    /// Only show pairings in these categories (can be used multiple times)
    #[arg(short, long)]
    pub category: Vec<String>,

    /// Limit results
    #[arg(short, long)]
    pub limit: Option<usize>,
}

pub(crate) fn parse_categories(raw: &[String]) -> anyhow::Result<Vec<Category>> {
    raw.iter()
        .map(|c| {
            Category::parse(c).ok_or_else(|| {
                let known: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                anyhow::anyhow!("Unknown category '{}'. Known: {}", c, known.join(", "))
            })
        })
        .collect()
}

pub fn run(args: &PairingsArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let min_strength = Strength::new(args.min_strength)?;
    let categories = parse_categories(&args.category)?;
    let graph = ctx.graph()?;

    let focus = LocalMatcher::match_one(&args.ingredient, graph.nodes())
        .ok_or_else(|| anyhow::anyhow!("No ingredient named '{}'", args.ingredient))?;

    let mut pairings = graph.neighbors(&focus.id, min_strength);
    if !categories.is_empty() {
        pairings.retain(|(node, _)| node.in_categories(&categories));
    }
    if let Some(limit) = args.limit {
        pairings.truncate(limit);
    }

    tracing::info!("{} has {} pairings", focus.id, pairings.len());
    println!("{}", format_pairings(focus, &pairings, cli.output_format()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_categories() {
        let parsed = parse_categories(&["fruits".to_string(), "Seafood".to_string()]).unwrap();
        assert_eq!(parsed, vec![Category::Fruits, Category::Seafood]);
        assert!(parse_categories(&["rocks".to_string()]).is_err());
    }
}
