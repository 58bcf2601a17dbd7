//! Query matching for search engines.
//!
//! Each engine is matched through two keywords, its trigger and its name,
//! both lower-cased with a trailing space (`"gg "`, `"google "`). A query
//! matches a keyword once the user has typed any prefix of it; whatever
//! follows the keyword is the search term. The score grows with the share
//! of the keyword typed so far.

use crate::core::action::{Action, RankedAction, Score};
use crate::engine::SearchEngine;

/// Score of a fully typed keyword.
pub const MAX_SCORE: Score = 100.0;

/// Searched for by fallbacks instead of an empty query.
pub const EMPTY_TERM_PLACEHOLDER: &str = "…";

/// Match `query` against every engine's trigger and name.
///
/// Returns at most one action per engine, in registry order. Callers sort
/// by score before display (see [`sort_by_score`]).
pub fn rank_items(query: &str, engines: &[SearchEngine]) -> Vec<RankedAction> {
    let mut results = Vec::new();

    if query.is_empty() {
        return results;
    }

    tracing::trace!("Matching query {:?}", query);

    for engine in engines {
        for keyword in keywords(engine) {
            let Some(typed) = match_prefix(&keyword, query) else {
                continue;
            };

            let keyword_len = keyword.chars().count();
            let score = typed.chars as f64 / keyword_len as f64 * MAX_SCORE;
            let term = &query[typed.end..];

            results.push(RankedAction::new(Action::build(engine, term), score));

            // Only the first (shortest) matching keyword counts
            break;
        }
    }

    tracing::debug!("{} of {} engines matched", results.len(), engines.len());
    results
}

/// Offer every fallback engine, searching for the whole query.
///
/// Fallbacks keep registry order and carry no score.
pub fn fallbacks(query: &str, engines: &[SearchEngine]) -> Vec<Action> {
    if query.is_empty() {
        return Vec::new();
    }

    engines
        .iter()
        .filter(|engine| engine.fallback)
        .map(|engine| Action::build(engine, fallback_term(query)))
        .collect()
}

fn fallback_term(query: &str) -> &str {
    if query.is_empty() {
        EMPTY_TERM_PLACEHOLDER
    } else {
        query
    }
}

/// Sort ranked actions by score, best first. Ties keep their order.
pub fn sort_by_score(results: &mut [RankedAction]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Trigger and name keywords, shortest first.
///
/// An empty trigger still yields the keyword `" "`.
fn keywords(engine: &SearchEngine) -> Vec<String> {
    let mut keywords = Vec::with_capacity(2);

    keywords.push(format!("{} ", engine.trigger.to_lowercase()));
    keywords.push(format!("{} ", engine.name.to_lowercase()));

    keywords.sort_by_key(|k| k.chars().count());
    keywords
}

/// How much of a keyword a query has typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Typed {
    /// Keyword characters covered by the query.
    chars: usize,
    /// Byte offset in the query where the search term starts.
    end: usize,
}

/// Check whether the lower-cased query, truncated to the keyword's length,
/// is a prefix of `keyword`.
fn match_prefix(keyword: &str, query: &str) -> Option<Typed> {
    let mut expected = keyword.chars().peekable();
    let mut chars = 0;

    for (offset, c) in query.char_indices() {
        if expected.peek().is_none() {
            return Some(Typed { chars, end: offset });
        }

        for lower in c.to_lowercase() {
            match expected.next() {
                Some(k) if k == lower => chars += 1,
                _ => return None,
            }
        }
    }

    Some(Typed {
        chars,
        end: query.len(),
    })
}
