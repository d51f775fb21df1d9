//! Shared, atomically replaceable vanity mapping.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::schema::{RepositoryEntry, VanityMap};

/// Process-wide holder of the current mapping generation.
///
/// Cloning is cheap and every clone observes the same generation. Readers
/// never block each other or a writer; `replace` swaps the whole mapping in
/// one step, so a reader sees either the old or the new generation.
#[derive(Clone, Default)]
pub struct ConfigStore {
    // ArcSwap is not Clone; the outer Arc shares it between handles.
    inner: Arc<ArcSwap<VanityMap>>,
}

impl ConfigStore {
    /// Empty store, as at process start before the first load.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_map(map: VanityMap) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(map)),
        }
    }

    /// Install a new generation, discarding the previous one.
    pub fn replace(&self, map: VanityMap) {
        self.inner.store(Arc::new(map));
    }

    /// Find the entry for a request path in the current generation.
    pub fn lookup(&self, path: &str) -> Option<RepositoryEntry> {
        self.inner.load().get(path).cloned()
    }

    /// The current generation; stays valid after later replaces.
    pub fn snapshot(&self) -> Arc<VanityMap> {
        self.inner.load_full()
    }

    pub fn len(&self) -> usize {
        self.inner.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore").field("entries", &self.len()).finish()
    }
}
