//! Persistence of the engine list as a JSON array.
//!
//! Reading is lenient: every field is read on its own and falls back to a
//! default when missing or of the wrong type, so one bad value never costs
//! the whole record. Older files used `guid` for the id and `iconUrl` /
//! `iconPath` for the icon, and had no `fallback` flag at all.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::{new_engine_id, SearchEngine};
use crate::error::{WebsearchError, WebsearchResult};

const ID_KEYS: &[&str] = &["id", "guid"];
const ICON_KEYS: &[&str] = &["icon_reference", "iconUrl", "iconPath"];

/// File-backed engine list.
#[derive(Debug, Clone)]
pub struct EngineStore {
    path: PathBuf,
}

impl EngineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored list.
    ///
    /// Returns `Ok(None)` when no file exists yet (first run).
    pub fn load(&self, fallback_default: bool) -> WebsearchResult<Option<Vec<SearchEngine>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        parse_engines(&content, fallback_default).map(Some)
    }

    /// Write the full list, creating the parent directory if needed.
    pub fn save(&self, engines: &[SearchEngine]) -> WebsearchResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, to_json(engines)?)?;
        Ok(())
    }

    /// Whether the file on disk differs from the canonical form of `engines`.
    pub fn needs_rewrite(&self, engines: &[SearchEngine]) -> bool {
        match (fs::read_to_string(&self.path), to_json(engines)) {
            (Ok(stored), Ok(canonical)) => stored.trim_end() != canonical.trim_end(),
            _ => true,
        }
    }
}

/// Serialize engines in the canonical format.
pub fn to_json(engines: &[SearchEngine]) -> WebsearchResult<String> {
    Ok(serde_json::to_string_pretty(engines)?)
}

/// Parse a stored engine list.
///
/// Fails only when the document is not a JSON array. Entries that are not
/// objects or have no name are skipped; missing or duplicate ids are replaced.
pub fn parse_engines(content: &str, fallback_default: bool) -> WebsearchResult<Vec<SearchEngine>> {
    let document: Value = serde_json::from_str(content)?;
    let Value::Array(records) = document else {
        return Err(WebsearchError::Storage(
            "engine list is not a JSON array".to_string(),
        ));
    };

    let mut engines: Vec<SearchEngine> = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let Some(object) = record.as_object() else {
            tracing::warn!("Skipping engine record {}: not an object", index);
            continue;
        };

        let mut engine = read_record(object, fallback_default);

        if engine.name.is_empty() {
            tracing::warn!("Skipping engine record {}: empty name", index);
            continue;
        }

        if engine.id.is_empty() || engines.iter().any(|e| e.id == engine.id) {
            let id = new_engine_id(&engines);
            if !engine.id.is_empty() {
                tracing::warn!(
                    "Duplicate engine id '{}' for '{}', reassigned to '{}'",
                    engine.id,
                    engine.name,
                    id
                );
            }
            engine.id = id;
        }

        engines.push(engine);
    }

    Ok(engines)
}

fn read_record(object: &Map<String, Value>, fallback_default: bool) -> SearchEngine {
    SearchEngine {
        id: first_string(object, ID_KEYS),
        name: string_field(object, "name"),
        trigger: string_field(object, "trigger").trim().to_string(),
        url: string_field(object, "url"),
        icon_reference: first_string(object, ICON_KEYS),
        fallback: object
            .get("fallback")
            .and_then(Value::as_bool)
            .unwrap_or(fallback_default),
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn first_string(object: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}
