//! Categories command

use serde::Serialize;

use crate::output::{to_json, OutputFormat};
use crate::{AppContext, Cli};

#[derive(Serialize)]
struct CategoryRow {
    category: &'static str,
    label: &'static str,
    nodes: usize,
}

pub fn run(cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let graph = ctx.graph()?;
    let rows: Vec<CategoryRow> = graph
        .category_counts()
        .into_iter()
        .map(|(category, nodes)| CategoryRow {
            category: category.as_str(),
            label: category.label(),
            nodes,
        })
        .collect();

    match cli.output_format() {
        OutputFormat::Json => println!("{}", to_json(&rows)),
        OutputFormat::Table => {
            for row in &rows {
                println!("  {:<20} {:>5}  {}", row.category, row.nodes, row.label);
            }
        }
    }
    Ok(())
}
