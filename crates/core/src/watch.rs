//! Binding between manifest save events and tree refresh

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

/// The set of manifest paths currently eligible to trigger a refresh.
///
/// One instance is shared between the provider, which swaps the contents
/// on every discovery pass, and the save watcher, which consults it. The
/// subscription itself is registered once for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct ManifestWatchSet {
    paths: Rc<RefCell<HashSet<PathBuf>>>,
}

impl ManifestWatchSet {
    /// Replaces the whole match set with the latest discovery result.
    pub fn replace(&self, paths: impl IntoIterator<Item = PathBuf>) {
        *self.paths.borrow_mut() = paths.into_iter().collect();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.borrow().contains(path)
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.paths.borrow().iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.borrow().is_empty()
    }
}

/// Feeds the host's document-saved stream through the manifest match set.
pub struct SaveWatcher {
    matches: ManifestWatchSet,
    on_match: Box<dyn Fn()>,
}

impl SaveWatcher {
    pub fn new(matches: ManifestWatchSet, on_match: Box<dyn Fn()>) -> Self {
        Self { matches, on_match }
    }

    /// Handles one saved-document path; a tracked manifest path triggers
    /// exactly one refresh signal, anything else is ignored.
    pub fn document_saved(&self, path: &Path) {
        if self.matches.contains(path) {
            debug!("Tracked manifest saved: {}", path.display());
            (self.on_match)();
        }
    }
}
