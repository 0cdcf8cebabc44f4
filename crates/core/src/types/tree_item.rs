use crate::dispatch::RunRequest;

/// How a node may be expanded in the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collapsible {
    None,
    Expanded,
}

/// Visual attributes handed to the rendering layer for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    pub label: String,
    pub collapsible: Collapsible,
    /// Action dispatched when the node is selected.
    pub action: Option<RunRequest>,
}
