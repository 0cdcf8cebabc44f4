pub mod formatter;

pub use formatter::{print_tree, render_tree, tree_to_json};
