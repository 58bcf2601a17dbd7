//! Nova websearch - web search shortcuts for the Nova launcher.
//!
//! Users configure search engines: a name, a short trigger, a URL template
//! with a `%s` marker, an icon and a fallback flag. Typing a prefix of
//! `"<trigger> "` or `"<name> "` selects an engine and the rest of the query
//! becomes the search term. Engines flagged as fallbacks are offered for any
//! query when nothing else matched well.
//!
//! # Architecture
//!
//! - [`core`] - Matching and fallback selection (pure functions)
//! - [`engine`] - Search engine records and URL templates
//! - [`registry`] - Sorted engine snapshots, edits, persistence, observers
//! - [`storage`] - JSON engine list with legacy tolerance
//! - [`icons`] - Icon import, discard to trash, resolution cache
//! - [`platform`] - URL opening
//! - [`config`] - Configuration loading
//! - [`cli`] - Command-line host
//!
//! # Example
//!
//! ```ignore
//! use nova_websearch::{Config, EngineRegistry};
//!
//! let registry = EngineRegistry::open(&Config::load());
//! let mut results = registry.rank_items("gg rust");
//! nova_websearch::core::sort_by_score(&mut results);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod defaults;
pub mod engine;
pub mod icons;
pub mod platform;
pub mod registry;
pub mod storage;

mod error;

pub use config::Config;
pub use crate::core::{fallbacks, rank_items, Action, RankedAction, Score, MAX_SCORE};
pub use engine::{EngineDraft, SearchEngine};
pub use error::{WebsearchError, WebsearchResult};
pub use platform::{SystemOpener, UrlOpener};
pub use registry::{EngineRegistry, EngineSnapshot};
