//! Recipe commands

use clap::{Args, Subcommand};

use crate::output::{format_recipes, to_json, OutputFormat};
use crate::{AppContext, Cli};
use flavorgraph_core::{NewRecipe, PairingGraph, RecipeId};
use flavorgraph_search::LocalMatcher;

#[derive(Args)]
pub struct RecipeArgs {
    #[command(subcommand)]
    pub command: RecipeCommands,
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    /// Save a new recipe
    Add {
        /// Recipe name
        name: String,
        /// Ingredients (can be used multiple times)
        #[arg(short, long = "ingredient", required = true)]
        ingredients: Vec<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List saved recipes
    List,
    /// Show one recipe
    Show {
        /// Recipe ID
        id: String,
    },
    /// Delete a recipe
    Remove {
        /// Recipe ID
        id: String,
    },
    /// Delete every recipe
    Clear {
        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },
}

fn parse_id(raw: &str) -> anyhow::Result<RecipeId> {
    RecipeId::from_string(raw.trim())
        .map_err(|e| anyhow::anyhow!("Invalid recipe id '{}': {}", raw, e))
}

/// Map typed names to node ids when a dataset is available
fn resolve_ingredients(names: &[String], graph: Option<&PairingGraph>) -> anyhow::Result<Vec<String>> {
    let Some(graph) = graph else {
        return Ok(names.iter().map(|n| n.trim().to_string()).collect());
    };
    names
        .iter()
        .map(|name| {
            LocalMatcher::match_one(name, graph.nodes())
                .map(|node| node.id.to_string())
                .ok_or_else(|| anyhow::anyhow!("No ingredient named '{}'", name))
        })
        .collect()
}

pub async fn run(args: &RecipeArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let book = ctx.recipe_book()?;
    let format = cli.output_format();

    match &args.command {
        RecipeCommands::Add {
            name,
            ingredients,
            notes,
        } => {
            let graph = ctx.graph_if_configured()?;
            if graph.is_none() {
                tracing::warn!("No dataset configured; storing ingredients as typed");
            }

            let mut new = NewRecipe::new(name.as_str());
            for id in resolve_ingredients(ingredients, graph.as_ref())? {
                new = new.with_ingredient(id);
            }
            if let Some(notes) = notes {
                new = new.with_notes(notes.as_str());
            }

            let recipe = book.add(new).await?;
            match format {
                OutputFormat::Json => println!("{}", to_json(&recipe)),
                OutputFormat::Table => println!("Saved recipe: {} ({})", recipe.name, recipe.id),
            }
        }
        RecipeCommands::List => {
            let recipes = book.list().await?;
            if recipes.is_empty() && format == OutputFormat::Table {
                println!("No recipes saved");
            } else {
                println!("{}", format_recipes(&recipes, format));
            }
        }
        RecipeCommands::Show { id } => {
            let id = parse_id(id)?;
            let recipe = book
                .get(&id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Recipe not found: {}", id))?;

            match format {
                OutputFormat::Json => println!("{}", to_json(&recipe)),
                OutputFormat::Table => {
                    println!("{} ({})", recipe.name, recipe.id);
                    for ingredient in &recipe.ingredients {
                        println!("  - {}", ingredient);
                    }
                    if let Some(ref notes) = recipe.notes {
                        println!();
                        println!("{}", notes);
                    }
                    println!();
                    println!("Updated {}", recipe.updated_at.format("%Y-%m-%d %H:%M UTC"));
                }
            }
        }
        RecipeCommands::Remove { id } => {
            let id = parse_id(id)?;
            if book.remove(&id).await? {
                println!("Removed recipe: {}", id);
            } else {
                anyhow::bail!("Recipe not found: {}", id);
            }
        }
        RecipeCommands::Clear { force } => {
            if !force {
                anyhow::bail!("Refusing to delete every recipe without --force");
            }
            book.clear().await?;
            println!("Cleared recipe book");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flavorgraph_core::Node;

    #[test]
    fn test_resolve_ingredients_against_graph() {
        let graph = PairingGraph::new(
            vec![Node::new("tomato-1", "Tomato"), Node::new("basil-2", "Basil")],
            Vec::new(),
        )
        .unwrap();

        let ids = resolve_ingredients(&["tomato".to_string(), "BASIL".to_string()], Some(&graph)).unwrap();
        assert_eq!(ids, vec!["tomato-1", "basil-2"]);

        assert!(resolve_ingredients(&["kale".to_string()], Some(&graph)).is_err());
        assert_eq!(
            resolve_ingredients(&[" kale ".to_string()], None).unwrap(),
            vec!["kale"]
        );
    }
}
