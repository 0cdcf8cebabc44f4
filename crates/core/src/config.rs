//! Package-manager preference and the settings file that stores it

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which package manager verb script invocations are composed with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
}

impl PackageManager {
    /// Maps the raw setting value onto a manager. Anything other than
    /// `"yarn"` falls back to npm.
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            Some("yarn") => PackageManager::Yarn,
            _ => PackageManager::Npm,
        }
    }

    /// Composes the shell invocation for `script`.
    pub fn invocation(&self, script: &str) -> String {
        match self {
            PackageManager::Yarn => format!("yarn {script}"),
            PackageManager::Npm => format!("npm run {script}"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<String>,
}

impl Settings {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse settings: {e}")))?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize settings: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_settings_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let settings_path = current.join(".scriptree.json");
            if settings_path.exists() {
                return Some(settings_path);
            }

            let settings_path = current.join("scriptree.json");
            if settings_path.exists() {
                return Some(settings_path);
            }

            current = current.parent()?;
        }
    }

    pub fn manager(&self) -> PackageManager {
        PackageManager::from_setting(self.package_manager.as_deref())
    }
}
