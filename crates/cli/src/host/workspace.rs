//! Workspace roots enumerated from a base directory

use scriptree_core::{WorkspaceRoot, WorkspaceSource};
use std::path::PathBuf;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Supplies the base directory plus its immediate subdirectories as
/// workspace roots, in file-name order. Hidden directories and
/// `node_modules` never count as roots; whether a root actually carries
/// a manifest is the provider's concern.
pub struct DirWorkspaceSource {
    base: PathBuf,
}

impl DirWorkspaceSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let base = std::fs::canonicalize(&base).unwrap_or(base);
        Self { base }
    }
}

fn is_candidate(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    !name.starts_with('.') && name != "node_modules"
}

impl WorkspaceSource for DirWorkspaceSource {
    fn roots(&self) -> Vec<WorkspaceRoot> {
        let roots: Vec<WorkspaceRoot> = WalkDir::new(&self.base)
            .min_depth(0)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || is_candidate(entry))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_dir())
            .map(|entry| WorkspaceRoot::from_path(entry.path()))
            .collect();
        debug!("Enumerated {} roots under {}", roots.len(), self.base.display());
        roots
    }
}
