//! Search engine records.
//!
//! A search engine is a named web-search shortcut: a display name, a short
//! trigger, a URL template with a `%s` marker and an optional icon.

use serde::{Deserialize, Serialize};

/// Marker in the URL template replaced by the percent-encoded search term.
pub const URL_PLACEHOLDER: &str = "%s";

/// Glyph used to make spaces inside a trigger visible in listings.
pub const TRIGGER_SPACE_GLYPH: char = '•';

/// Icon reference used for engines created without an icon.
pub const DEFAULT_ICON: &str = ":default";

/// One configured search engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEngine {
    /// Stable identifier, never changes after creation.
    pub id: String,
    pub name: String,
    pub trigger: String,
    pub url: String,
    pub icon_reference: String,
    pub fallback: bool,
}

impl SearchEngine {
    /// Substitute the percent-encoded `term` for the `%s` marker.
    pub fn resolve_url(&self, term: &str) -> String {
        self.url.replace(URL_PLACEHOLDER, &urlencoding::encode(term))
    }

    pub fn has_placeholder(&self) -> bool {
        self.url.contains(URL_PLACEHOLDER)
    }

    /// Trigger with internal spaces rendered as a visible glyph.
    pub fn display_trigger(&self) -> String {
        self.trigger.replace(' ', &TRIGGER_SPACE_GLYPH.to_string())
    }
}

/// The user-editable fields of an engine, everything except the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineDraft {
    pub name: String,
    pub trigger: String,
    pub url: String,
    pub fallback: bool,
}

impl EngineDraft {
    pub fn new(name: impl Into<String>, trigger: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trigger: trigger.into(),
            url: url.into(),
            fallback: false,
        }
    }

    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// Copy the draft into `engine`, keeping its id and icon.
    pub(crate) fn apply_to(&self, engine: &mut SearchEngine) {
        engine.name = self.name.clone();
        engine.trigger = self.trigger.trim().to_string();
        engine.url = self.url.clone();
        engine.fallback = self.fallback;
    }

    pub(crate) fn into_engine(self, id: String) -> SearchEngine {
        let mut engine = SearchEngine {
            id,
            name: String::new(),
            trigger: String::new(),
            url: String::new(),
            icon_reference: DEFAULT_ICON.to_string(),
            fallback: false,
        };
        self.apply_to(&mut engine);
        engine
    }
}

/// Generate a short random id that no engine in `existing` uses yet.
pub fn new_engine_id(existing: &[SearchEngine]) -> String {
    loop {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        let id = uuid[..8].to_string();
        if !existing.iter().any(|e| e.id == id) {
            return id;
        }
    }
}
