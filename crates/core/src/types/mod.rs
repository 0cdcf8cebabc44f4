pub mod node;
pub mod tree_item;

pub use node::{PlaceholderNode, ProjectNode, ScriptNode, TreeNode, capitalize};
pub use tree_item::{Collapsible, TreeItem};
