//! Search command

use std::io::{BufRead, IsTerminal, Write};
use std::sync::Arc;

use clap::Args;

use crate::config::{Config, ProviderKind};
use crate::output::format_result;
use crate::{AppContext, Cli};
use flavorgraph_llm::{
    CursorAgentProvider, GeminiProvider, ProviderError, Resolver, TextProvider,
};

/// Holy grail hints passed to the provider
const HINT_LIMIT: usize = 12;

/// Credential prompts per search (Cursor may need a key and a repository)
const MAX_CREDENTIAL_PROMPTS: usize = 2;

#[derive(Args)]
pub struct SearchArgs {
    /// Ingredient name or question
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Provider for free-text questions: gemini, cursor
    #[arg(long)]
    pub provider: Option<String>,
}

fn build_provider(kind: ProviderKind, config: &Config) -> anyhow::Result<Arc<dyn TextProvider>> {
    Ok(match kind {
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(config.gemini.clone())?),
        ProviderKind::Cursor => Arc::new(CursorAgentProvider::new(config.cursor.clone())?),
    })
}

/// Config key for the credential a provider reported missing
fn credential_key(provider: &str, what: &str) -> Option<&'static str> {
    match (provider, what) {
        ("gemini", "API key") => Some("gemini.api_key"),
        ("cursor", "API key") => Some("cursor.api_key"),
        ("cursor", "repository URL") => Some("cursor.repository"),
        _ => None,
    }
}

/// Ask for a missing credential on stdin and save it to the config file
fn ask_and_save(ctx: &mut AppContext, provider: &str, what: &str) -> anyhow::Result<()> {
    let key = credential_key(provider, what)
        .ok_or_else(|| anyhow::anyhow!("Missing {} for {}", what, provider))?;

    if !std::io::stdin().is_terminal() {
        anyhow::bail!(
            "Missing {} for {}. Run `flavorgraph config set {} <VALUE>`",
            what,
            provider,
            key
        );
    }

    eprint!("Enter {} {}: ", provider, what);
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let value = line.trim();
    if value.is_empty() {
        anyhow::bail!("No {} entered", what);
    }

    // Persist to the file only; env overrides stay out of it
    Config::update_file(&crate::config::config_file_path(), key, value)?;
    ctx.config.set(key, value)?;
    eprintln!("Saved {} to {}", key, crate::config::config_file_path().display());
    Ok(())
}

pub async fn run(args: &SearchArgs, cli: &Cli, ctx: &mut AppContext) -> anyhow::Result<()> {
    let query = args.query.join(" ");
    let graph = ctx.graph()?;

    let kind = match args.provider.as_deref() {
        Some(name) => ProviderKind::parse(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown provider '{}' (gemini, cursor)", name))?,
        None => ctx.config.provider,
    };
    let hints = Resolver::hints_for(&query, &graph, HINT_LIMIT);

    let mut prompts = 0;
    let result = loop {
        let resolver = Resolver::new(build_provider(kind, &ctx.config)?);
        tracing::debug!("Searching {:?} with {}", query, resolver.provider_name());
        match resolver.resolve(&query, &graph, &hints).await {
            Ok(result) => break result,
            Err(ProviderError::MissingCredentials { provider, what })
                if prompts < MAX_CREDENTIAL_PROMPTS =>
            {
                prompts += 1;
                ask_and_save(ctx, provider, what)?;
                tracing::info!("Retrying search with new {}", what);
            }
            Err(ProviderError::RateLimited {
                provider,
                retry_after: Some(wait),
            }) => anyhow::bail!(
                "Rate limited by {}; try again in {}s",
                provider,
                wait.as_secs().max(1)
            ),
            Err(e) => return Err(e.into()),
        }
    };

    tracing::info!("Search for {:?} resolved to {}", query, result.kind());
    println!("{}", format_result(&result, &graph, cli.output_format()));
    Ok(())
}
