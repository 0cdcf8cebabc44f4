//! Plain-text and JSON rendering of the script tree

use scriptree_core::{ScriptTreeProvider, TreeNode};

/// Renders the two-level project/script tree as indented text.
pub fn render_tree(provider: &ScriptTreeProvider) -> String {
    let mut out = String::new();
    for node in provider.children(None) {
        match &node {
            TreeNode::Project(project) => {
                out.push_str(&project.label);
                out.push('\n');
                for child in provider.children(Some(&node)) {
                    match child {
                        TreeNode::Script(script) => {
                            out.push_str(&format!(
                                "  {:<16} {}\n",
                                script.label, script.invocation
                            ));
                        }
                        TreeNode::Placeholder(placeholder) => {
                            out.push_str(&format!("  {}\n", placeholder.message));
                        }
                        TreeNode::Project(_) => {}
                    }
                }
            }
            TreeNode::Placeholder(placeholder) => {
                out.push_str(&placeholder.message);
                out.push('\n');
            }
            TreeNode::Script(_) => {}
        }
    }
    out
}

pub fn print_tree(provider: &ScriptTreeProvider) {
    print!("{}", render_tree(provider));
}

/// Serializes the tree as JSON, one entry per root node with its
/// children inlined.
pub fn tree_to_json(provider: &ScriptTreeProvider) -> serde_json::Result<String> {
    let tree: Vec<serde_json::Value> = provider
        .children(None)
        .iter()
        .map(|node| {
            let children = provider.children(Some(node));
            serde_json::json!({ "node": node, "children": children })
        })
        .collect();
    serde_json::to_string_pretty(&tree)
}
