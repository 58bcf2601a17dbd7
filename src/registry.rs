//! The engine registry.
//!
//! Holds the configured engines as an immutable, name-sorted snapshot. Every
//! mutation builds a new snapshot, persists it in full and notifies
//! observers, so a snapshot handed to a running query never changes.

use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::core::{fallbacks, rank_items, Action, RankedAction};
use crate::defaults::default_engines;
use crate::engine::{new_engine_id, EngineDraft, SearchEngine, DEFAULT_ICON};
use crate::error::{WebsearchError, WebsearchResult};
use crate::icons::{IconRef, IconStore};
use crate::storage::EngineStore;

/// Read-only view of the registry at one point in time.
pub type EngineSnapshot = Arc<[SearchEngine]>;

type Observer = Box<dyn Fn(&EngineSnapshot)>;

pub struct EngineRegistry {
    engines: EngineSnapshot,
    store: EngineStore,
    icons: IconStore,
    fallback_default: bool,
    observers: Vec<Observer>,
}

impl EngineRegistry {
    /// Open the registry at the locations named by `config`.
    pub fn open(config: &Config) -> Self {
        Self::load(
            EngineStore::new(config.storage.engines_path()),
            IconStore::new(config.storage.icons_dir(), config.storage.trash_dir()),
            config.behavior.legacy_fallback_default,
        )
    }

    /// Load stored engines, seeding the defaults on first run.
    ///
    /// A missing or unreadable engine list is treated as a first run.
    pub fn load(store: EngineStore, icons: IconStore, fallback_default: bool) -> Self {
        let mut registry = Self {
            engines: Arc::from(Vec::new()),
            store,
            icons,
            fallback_default,
            observers: Vec::new(),
        };

        match registry.store.load(fallback_default) {
            Ok(Some(mut engines)) => {
                sort_by_name(&mut engines);
                tracing::info!(
                    "Loaded {} search engines from {}",
                    engines.len(),
                    registry.store.path().display()
                );

                // Legacy records and repaired ids only become stable once written back
                let rewrite = registry.store.needs_rewrite(&engines);
                registry.engines = Arc::from(engines);
                if rewrite {
                    registry.persist();
                }
            }
            Ok(None) => {
                tracing::info!(
                    "No engines file found. Using defaults. ({})",
                    registry.store.path().display()
                );
                registry.restore_defaults();
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read engines file {}: {}. Using defaults.",
                    registry.store.path().display(),
                    e
                );
                registry.restore_defaults();
            }
        }

        registry
    }

    /// The current snapshot.
    pub fn engines(&self) -> EngineSnapshot {
        Arc::clone(&self.engines)
    }

    pub fn get(&self, id: &str) -> Option<&SearchEngine> {
        self.engines.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Trigger matches for `query` against the current snapshot.
    pub fn rank_items(&self, query: &str) -> Vec<RankedAction> {
        rank_items(query, &self.engines)
    }

    /// Fallback actions for `query` against the current snapshot.
    pub fn fallbacks(&self, query: &str) -> Vec<Action> {
        fallbacks(query, &self.engines)
    }

    /// Register a callback run with every new snapshot.
    pub fn subscribe(&mut self, observer: impl Fn(&EngineSnapshot) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Replace all engines. The list is sorted by name, persisted and published.
    pub fn set_engines(&mut self, mut engines: Vec<SearchEngine>) -> EngineSnapshot {
        sort_by_name(&mut engines);
        self.engines = Arc::from(engines);
        self.persist();

        for observer in &self.observers {
            observer(&self.engines);
        }

        self.engines()
    }

    /// Replace all engines with the bundled defaults.
    pub fn restore_defaults(&mut self) -> EngineSnapshot {
        self.set_engines(default_engines(self.fallback_default))
    }

    /// Add a new engine and return its id.
    pub fn add_engine(&mut self, draft: EngineDraft) -> WebsearchResult<String> {
        validate(&draft)?;

        let id = new_engine_id(&self.engines);
        let mut engines = self.engines.to_vec();
        engines.push(draft.into_engine(id.clone()));
        self.set_engines(engines);

        tracing::info!("Added search engine {}", id);
        Ok(id)
    }

    /// Overwrite the editable fields of an engine.
    pub fn update_engine(&mut self, id: &str, draft: EngineDraft) -> WebsearchResult<()> {
        validate(&draft)?;
        self.modify(id, |engine| draft.apply_to(engine))
    }

    pub fn set_trigger(&mut self, id: &str, trigger: &str) -> WebsearchResult<()> {
        let trigger = trigger.trim().to_string();
        self.modify(id, |engine| engine.trigger = trigger)
    }

    pub fn set_fallback(&mut self, id: &str, fallback: bool) -> WebsearchResult<()> {
        self.modify(id, |engine| engine.fallback = fallback)
    }

    /// Use `source` as the engine's icon.
    ///
    /// The image is decoded first; only then is a previous user icon moved
    /// to the trash and the scaled copy written.
    pub fn set_icon(&mut self, id: &str, source: &Path) -> WebsearchResult<()> {
        let previous = self
            .get(id)
            .ok_or_else(|| WebsearchError::UnknownEngine(id.to_string()))?
            .icon_reference
            .clone();

        if IconRef::parse(&previous).local_path() == Some(source) {
            return Ok(());
        }
        let image = IconStore::load(source)?;

        self.icons.discard(&previous);

        match self.icons.save(id, &image) {
            Ok(reference) => self.modify(id, |engine| engine.icon_reference = reference),
            Err(e) => {
                tracing::warn!("{}", e);
                self.modify(id, |engine| engine.icon_reference = DEFAULT_ICON.to_string())?;
                Err(e)
            }
        }
    }

    /// Remove an engine, moving its user icon to the trash.
    pub fn remove_engine(&mut self, id: &str) -> WebsearchResult<SearchEngine> {
        let mut engines = self.engines.to_vec();
        let index = position(&engines, id)?;
        let removed = engines.remove(index);

        self.icons.discard(&removed.icon_reference);
        self.set_engines(engines);

        tracing::info!("Removed search engine {} ({})", removed.id, removed.name);
        Ok(removed)
    }

    fn modify(&mut self, id: &str, edit: impl FnOnce(&mut SearchEngine)) -> WebsearchResult<()> {
        let mut engines = self.engines.to_vec();
        let index = position(&engines, id)?;
        edit(&mut engines[index]);
        self.set_engines(engines);
        Ok(())
    }

    /// Write the current snapshot. The in-memory state stays authoritative
    /// when this fails.
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.engines) {
            tracing::error!(
                "Could not write to file '{}': {}",
                self.store.path().display(),
                e
            );
        }
    }
}

fn sort_by_name(engines: &mut [SearchEngine]) {
    engines.sort_by(|a, b| a.name.cmp(&b.name));
}

fn position(engines: &[SearchEngine], id: &str) -> WebsearchResult<usize> {
    engines
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| WebsearchError::UnknownEngine(id.to_string()))
}

fn validate(draft: &EngineDraft) -> WebsearchResult<()> {
    if draft.name.trim().is_empty() {
        return Err(WebsearchError::InvalidEngine(
            "name must not be empty".to_string(),
        ));
    }
    Ok(())
}
