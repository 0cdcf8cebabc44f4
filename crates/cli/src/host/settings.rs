use scriptree_core::{PackageManager, Settings, SettingsStore};
use std::path::PathBuf;
use tracing::warn;

/// Package-manager preference backed by the nearest settings file,
/// re-read on every access.
pub struct FileSettings {
    start: PathBuf,
}

impl FileSettings {
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            start: start.into(),
        }
    }
}

impl SettingsStore for FileSettings {
    fn package_manager(&self) -> PackageManager {
        let Some(path) = Settings::find_settings_file(&self.start) else {
            return PackageManager::default();
        };
        match Settings::load_from_file(&path) {
            Ok(settings) => settings.manager(),
            Err(err) => {
                warn!("Ignoring unreadable settings {}: {err}", path.display());
                PackageManager::default()
            }
        }
    }
}
