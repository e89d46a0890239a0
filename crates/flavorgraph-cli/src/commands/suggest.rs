//! Suggest command (autocomplete)

use clap::Args;

use super::pairings::parse_categories;
use crate::output::format_nodes;
use crate::{AppContext, Cli};
use flavorgraph_core::Node;
use flavorgraph_search::{FuzzySuggester, LocalMatcher, NodeMatcher};

#[derive(Args)]
pub struct SuggestArgs {
    /// Partial ingredient name
    pub query: String,

    /// Limit results
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Always rank with the fuzzy matcher
    #[arg(long)]
    pub fuzzy: bool,

    /// Only suggest ingredients in these categories (can be used multiple times)
    #[arg(short, long)]
    pub category: Vec<String>,
}

pub fn run(args: &SuggestArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let categories = parse_categories(&args.category)?;
    let mut graph = ctx.graph()?;
    if !categories.is_empty() {
        graph = graph.filter_categories(&categories);
    }
    let nodes = graph.nodes();

    let mut suggestions: Vec<&Node> = if args.fuzzy {
        Vec::new()
    } else {
        LocalMatcher::new().search(&args.query, nodes, args.limit)
    };

    // Typos and abbreviations miss every substring tier
    if suggestions.is_empty() {
        tracing::debug!("No substring matches for {:?}; using fuzzy ranking", args.query);
        suggestions = FuzzySuggester::new().search(&args.query, nodes, args.limit);
    }

    if suggestions.is_empty() {
        if !cli.quiet {
            eprintln!("No suggestions for '{}'", args.query);
        }
        return Ok(());
    }
    println!("{}", format_nodes(&suggestions, cli.output_format()));
    Ok(())
}
