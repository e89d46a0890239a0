//! Flavorgraph CLI - Command line interface for the pairing explorer

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{categories, completions, pairings, recipe, search, suggest};
use config::Config;
use flavorgraph_core::{Dataset, PairingGraph};
use flavorgraph_storage::{RecipeBook, RedbBackend};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "flavorgraph")]
#[command(author, version, about = "Explore ingredient pairings from the command line")]
pub struct Cli {
    /// Pairing dataset (JSON with nodes and edges)
    #[arg(long, global = true, env = "FLAVORGRAPH_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format: table, json
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from(self.format.as_str())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve an ingredient name or a question
    Search(search::SearchArgs),
    /// Suggest ingredient names for partial input
    Suggest(suggest::SuggestArgs),
    /// List what pairs with an ingredient
    Pairings(pairings::PairingsArgs),
    /// Show node counts per category
    Categories,
    /// Manage saved recipes
    Recipe(recipe::RecipeArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context: settings plus lazily opened data sources
pub struct AppContext {
    pub config: Config,
    pub data_dir: PathBuf,
    dataset: Option<PathBuf>,
}

impl AppContext {
    pub fn new(cli: &Cli) -> Self {
        let config = Config::load().with_env();
        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| config.data_dir.clone())
            .unwrap_or_else(config::default_data_dir);
        let dataset = cli.dataset.clone().or_else(|| config.dataset.clone());

        Self {
            config,
            data_dir,
            dataset,
        }
    }

    /// Configured dataset, or `dataset.json` in the data directory if present
    fn dataset_path(&self) -> Option<PathBuf> {
        self.dataset.clone().or_else(|| {
            let fallback = self.data_dir.join("dataset.json");
            fallback.exists().then_some(fallback)
        })
    }

    /// Load the pairing graph from the configured dataset
    pub fn graph(&self) -> anyhow::Result<PairingGraph> {
        let path = self.dataset_path().context(
            "No dataset configured. Pass --dataset <FILE> or run `flavorgraph config set dataset <FILE>`",
        )?;
        Self::load_graph(&path)
    }

    /// Like [`AppContext::graph`], but `None` when no dataset is configured
    pub fn graph_if_configured(&self) -> anyhow::Result<Option<PairingGraph>> {
        self.dataset_path()
            .map(|path| Self::load_graph(&path))
            .transpose()
    }

    fn load_graph(path: &std::path::Path) -> anyhow::Result<PairingGraph> {
        tracing::debug!("Using dataset at: {:?}", path);
        let graph = Dataset::from_path(path)
            .and_then(|dataset| dataset.into_graph())
            .with_context(|| format!("loading dataset {}", path.display()))?;
        tracing::info!(
            "Loaded {} nodes and {} edges",
            graph.nodes().len(),
            graph.edges().len()
        );
        Ok(graph)
    }

    pub fn recipe_book(&self) -> anyhow::Result<RecipeBook<RedbBackend>> {
        std::fs::create_dir_all(&self.data_dir)?;

        let db_path = self.data_dir.join("flavorgraph.redb");
        tracing::debug!("Using database at: {:?}", db_path);

        let backend = RedbBackend::open(&db_path)?;
        Ok(RecipeBook::new(Arc::new(backend)))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting flavorgraph CLI");

    let mut ctx = AppContext::new(&cli);

    match &cli.command {
        Commands::Search(args) => search::run(args, &cli, &mut ctx).await?,
        Commands::Suggest(args) => suggest::run(args, &cli, &ctx)?,
        Commands::Pairings(args) => pairings::run(args, &cli, &ctx)?,
        Commands::Categories => categories::run(&cli, &ctx)?,
        Commands::Recipe(args) => recipe::run(args, &cli, &ctx).await?,
        Commands::Config(args) => commands::config::run(args)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
