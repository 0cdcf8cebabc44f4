use serde::Serialize;
use std::path::PathBuf;

/// Project entry at the root level of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectNode {
    pub label: String,
    pub root_path: PathBuf,
}

/// Display node for one discovered script entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptNode {
    /// Capitalized script name shown in the tree.
    pub label: String,
    /// Fully composed shell invocation for this script.
    pub invocation: String,
    /// Root path of the owning project. A lookup key into the provider
    /// registry, never an owning edge.
    pub project: PathBuf,
}

/// Terminal informational node: no workspace roots, or a manifest that
/// could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderNode {
    pub message: String,
}

/// One renderable node of the two-level script tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Project(ProjectNode),
    Script(ScriptNode),
    Placeholder(PlaceholderNode),
}

/// Upper-cases the first character of `name` and lower-cases the rest.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}
