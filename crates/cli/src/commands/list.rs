use anyhow::{Context, Result};
use tracing::debug;

use crate::commands::build_provider;
use crate::display::{print_tree, tree_to_json};

pub fn list_command(dir: Option<&str>, json: bool) -> Result<()> {
    debug!("Listing scripts under {:?}", dir);

    let provider = build_provider(dir)?;
    if json {
        let rendered = tree_to_json(&provider).context("Failed to serialize the script tree")?;
        println!("{rendered}");
    } else {
        print_tree(&provider);
    }
    Ok(())
}
