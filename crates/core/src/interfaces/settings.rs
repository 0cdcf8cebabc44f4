use crate::config::PackageManager;

/// Access to the user's package-manager preference.
///
/// Implementations read the backing store fresh on every call; the
/// provider consults this once per script-list build, never caching it
/// across builds.
pub trait SettingsStore {
    fn package_manager(&self) -> PackageManager;
}
