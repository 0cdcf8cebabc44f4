//! scriptree-core - discovery of package manifest scripts and
//! per-project shell session lifecycle
//!
//! This crate provides functionality to:
//! - Find `package.json` manifests across workspace roots and parse their
//!   `scripts` section in declaration order
//! - Present projects and scripts as a two-level tree with renderable items
//! - Run a selected script inside a reusable, project-scoped shell session
//!   obtained from a host-provided shell seam
pub mod config;
pub mod dispatch;
pub mod error;
pub mod interfaces;
pub mod manifest;
pub mod project;
pub mod provider;
pub mod types;
pub mod watch;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use config::{PackageManager, Settings};
pub use dispatch::{CommandDispatcher, RunRequest};
pub use interfaces::{
    Notifier, SessionId, SettingsStore, ShellHost, WorkspaceRoot, WorkspaceSource,
};
pub use project::{Project, SessionState};
pub use provider::ScriptTreeProvider;
pub use watch::{ManifestWatchSet, SaveWatcher};
