//! Host seams consumed by the discovery and session core
//!
//! The tree-rendering widget, the interactive shell host, the settings
//! store, and workspace enumeration are external collaborators. These
//! traits are the surface the core consumes; the CLI crate and the test
//! fakes provide the implementations.

pub mod notifier;
pub mod settings;
pub mod shell;
pub mod workspace;

pub use notifier::Notifier;
pub use settings::SettingsStore;
pub use shell::{SessionId, ShellHost};
pub use workspace::{WorkspaceRoot, WorkspaceSource};
