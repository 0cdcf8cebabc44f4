//! Reading `package.json` manifests and their `scripts` section

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the package manifest probed for in every workspace root.
pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Clone, Default, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    scripts: Option<IndexMap<String, String>>,
}

/// Checks whether `root` contains a package manifest and returns its path.
///
/// The existence check is separate from the read; a manifest deleted
/// between the two surfaces as a read error on the caller.
pub fn find_manifest(root: &Path) -> Option<PathBuf> {
    let candidate = root.join(MANIFEST_FILE);
    if candidate.exists() {
        Some(candidate)
    } else {
        None
    }
}

fn read_manifest(path: &Path) -> Result<PackageManifest> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| Error::ManifestError(format!("Failed to parse {}: {e}", path.display())))
}

/// Parses the `scripts` section of the manifest at `path`.
///
/// Returns the name → command mapping in declaration order. A manifest
/// without a `scripts` section yields an empty map; an unparseable
/// manifest is a hard error left to the caller.
pub fn read_scripts(path: &Path) -> Result<IndexMap<String, String>> {
    let manifest = read_manifest(path)?;
    let scripts = manifest.scripts.unwrap_or_default();
    debug!("Parsed {} scripts from {}", scripts.len(), path.display());
    Ok(scripts)
}

/// Reads the `name` field of the manifest at `path`, if present.
pub fn package_name(path: &Path) -> Result<Option<String>> {
    Ok(read_manifest(path)?.name)
}
