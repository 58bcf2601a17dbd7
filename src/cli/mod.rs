//! CLI for the websearch component.
//!
//! Queries the configured engines and edits the engine list.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::core::sort_by_score;
use crate::engine::EngineDraft;
use crate::icons::{IconCache, ResolvedIcon};
use crate::platform::SystemOpener;
use crate::registry::EngineRegistry;

#[derive(Parser)]
#[command(name = "nova-websearch")]
#[command(about = "Web search shortcuts for the Nova launcher", long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show engines whose trigger or name matches the query, best first
    Query { query: String },

    /// Show the fallback searches offered for the query
    Fallbacks { query: String },

    /// Open the best match for the query (or the first fallback)
    Open { query: String },

    /// List configured engines
    List,

    /// Add a search engine
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        trigger: String,

        /// URL template, %s is replaced by the search term
        #[arg(long)]
        url: String,

        /// Offer this engine as a fallback
        #[arg(long)]
        fallback: bool,
    },

    /// Edit an engine (fields not given stay unchanged)
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        trigger: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        fallback: Option<bool>,
    },

    /// Set an engine's trigger
    Trigger { id: String, trigger: String },

    /// Enable or disable an engine as fallback
    Fallback {
        id: String,

        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },

    /// Use an image file as an engine's icon
    Icon { id: String, path: PathBuf },

    /// Remove an engine
    Remove { id: String },

    /// Replace all engines with the defaults
    RestoreDefaults,
}

/// Run the CLI.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut registry = EngineRegistry::open(&config);
    let max_results = config.behavior.max_results as usize;

    match cli.command {
        Commands::Query { query } => {
            let mut results = registry.rank_items(&query);
            sort_by_score(&mut results);

            if results.is_empty() {
                println!("No matching engines");
            }
            for ranked in results.iter().take(max_results) {
                println!(
                    "{:>6.1}  {}  {}",
                    ranked.score, ranked.action.subtitle, ranked.action.url
                );
            }
        }

        Commands::Fallbacks { query } => {
            for action in registry.fallbacks(&query) {
                println!("{}  {}", action.subtitle, action.url);
            }
        }

        Commands::Open { query } => {
            let mut results = registry.rank_items(&query);
            sort_by_score(&mut results);

            let action = match results.into_iter().next() {
                Some(ranked) => ranked.action,
                None => registry
                    .fallbacks(&query)
                    .into_iter()
                    .next()
                    .context("No engine matches and no fallback engine is enabled")?,
            };

            println!("{}", action.subtitle);
            action.activate(&SystemOpener)?;
        }

        Commands::List => {
            let mut cache = IconCache::new();

            for engine in registry.engines().iter() {
                let icon = match cache.resolve(&engine.icon_reference) {
                    ResolvedIcon::File(path) => path.display().to_string(),
                    ResolvedIcon::Missing(path) => format!("{} (missing)", path.display()),
                    ResolvedIcon::Themed(name) => format!("theme:{}", name),
                    ResolvedIcon::Resource(name) => name.clone(),
                };

                println!(
                    "{}  {:<16} {:<6} {}  {}  [{}]",
                    engine.id,
                    engine.name,
                    engine.display_trigger(),
                    if engine.fallback { "F" } else { "-" },
                    engine.url,
                    icon
                );
            }
        }

        Commands::Add {
            name,
            trigger,
            url,
            fallback,
        } => {
            let draft = EngineDraft::new(name, trigger, url).with_fallback(fallback);
            let id = registry.add_engine(draft)?;
            println!("Added {}", id);
        }

        Commands::Edit {
            id,
            name,
            trigger,
            url,
            fallback,
        } => {
            let engine = registry
                .get(&id)
                .with_context(|| format!("Unknown search engine: {}", id))?;

            let draft = EngineDraft {
                name: name.unwrap_or_else(|| engine.name.clone()),
                trigger: trigger.unwrap_or_else(|| engine.trigger.clone()),
                url: url.unwrap_or_else(|| engine.url.clone()),
                fallback: fallback.unwrap_or(engine.fallback),
            };
            registry.update_engine(&id, draft)?;
        }

        Commands::Trigger { id, trigger } => registry.set_trigger(&id, &trigger)?,

        Commands::Fallback { id, enabled } => registry.set_fallback(&id, enabled)?,

        Commands::Icon { id, path } => registry.set_icon(&id, &path)?,

        Commands::Remove { id } => {
            let removed = registry.remove_engine(&id)?;
            println!("Removed {}", removed.name);
        }

        Commands::RestoreDefaults => {
            let engines = registry.restore_defaults();
            println!("Restored {} default engines", engines.len());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_query_keeps_spaces() {
        let cli = Cli::try_parse_from(["nova-websearch", "query", "gg rust book"]).unwrap();
        match cli.command {
            Commands::Query { query } => assert_eq!(query, "gg rust book"),
            _ => panic!("expected query"),
        }
    }

    #[test]
    fn test_parse_fallback_toggle() {
        let cli = Cli::try_parse_from(["nova-websearch", "fallback", "abc", "false"]).unwrap();
        match cli.command {
            Commands::Fallback { id, enabled } => {
                assert_eq!(id, "abc");
                assert!(!enabled);
            }
            _ => panic!("expected fallback"),
        }
    }
}
