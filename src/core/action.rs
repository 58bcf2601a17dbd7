//! Renderable actions produced by matching.

use crate::engine::SearchEngine;
use crate::error::WebsearchResult;
use crate::platform::UrlOpener;

/// Match quality, `0.0..=MAX_SCORE`.
pub type Score = f64;

/// A web search the user can activate.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Id of the engine this action searches.
    pub id: String,
    pub label: String,
    pub subtitle: String,
    /// Text to put in the query field when completing this action.
    pub completion: String,
    /// Icon references in order of preference.
    pub icons: Vec<String>,
    /// The search term that was substituted into the URL.
    pub term: String,
    pub url: String,
}

impl Action {
    /// Build the action searching `engine` for `term`.
    pub fn build(engine: &SearchEngine, term: &str) -> Self {
        Self {
            id: engine.id.clone(),
            label: engine.name.clone(),
            subtitle: format!("Search {} for '{}'", engine.name, term),
            completion: format!("{} {}", engine.name, term),
            icons: vec![
                format!("xdg:{}", engine.name.to_lowercase()),
                engine.icon_reference.clone(),
            ],
            term: term.to_string(),
            url: engine.resolve_url(term),
        }
    }

    /// Open the resolved URL.
    pub fn activate(&self, opener: &dyn UrlOpener) -> WebsearchResult<()> {
        opener.open_url(&self.url)
    }
}

/// An action paired with its match score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedAction {
    pub action: Action,
    pub score: Score,
}

impl RankedAction {
    pub fn new(action: Action, score: Score) -> Self {
        Self { action, score }
    }
}
