//! Bundled default search engines.

use crate::engine::{new_engine_id, SearchEngine};

/// (name, trigger, icon, url)
const SEED_ENGINES: &[(&str, &str, &str, &str)] = &[
    ("Google", "gg", ":google", "https://www.google.com/search?q=%s"),
    ("Youtube", "yt", ":youtube", "https://www.youtube.com/results?search_query=%s"),
    ("Amazon", "ama", ":amazon", "https://www.amazon.com/s/?field-keywords=%s"),
    ("Ebay", "eb", ":ebay", "https://www.ebay.com/sch/i.html?_nkw=%s"),
    ("GitHub", "gh", ":github", "https://github.com/search?utf8=✓&q=%s"),
    ("Wolfram Alpha", "=", ":wolfram", "https://www.wolframalpha.com/input/?i=%s"),
    ("DuckDuckGo", "dd", ":duckduckgo", "https://duckduckgo.com/?q=%s"),
];

/// Build the seed list, each engine with a fresh id.
///
/// Seeds carry no fallback flag of their own; `fallback` is the same default
/// applied to stored records that lack the field.
pub fn default_engines(fallback: bool) -> Vec<SearchEngine> {
    let mut engines: Vec<SearchEngine> = Vec::with_capacity(SEED_ENGINES.len());

    for (name, trigger, icon, url) in SEED_ENGINES {
        let id = new_engine_id(&engines);
        engines.push(SearchEngine {
            id,
            name: name.to_string(),
            trigger: trigger.to_string(),
            url: url.to_string(),
            icon_reference: icon.to_string(),
            fallback,
        });
    }

    engines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seeds_have_unique_ids() {
        let engines = default_engines(true);
        let ids: HashSet<_> = engines.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), engines.len());
    }

    #[test]
    fn test_seeds_are_valid_templates() {
        for engine in default_engines(false) {
            assert!(!engine.name.is_empty());
            assert!(engine.has_placeholder(), "{} lacks %s", engine.name);
            assert_eq!(engine.trigger, engine.trigger.trim());
            assert!(!engine.fallback);
        }
    }

    #[test]
    fn test_fresh_ids_each_call() {
        let a = default_engines(true);
        let b = default_engines(true);
        assert!(a.iter().zip(&b).any(|(x, y)| x.id != y.id));
    }
}
