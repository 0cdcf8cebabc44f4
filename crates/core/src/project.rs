//! Project model and per-project shell session lifecycle

use crate::error::{Error, Result};
use crate::interfaces::{Notifier, SessionId, ShellHost, WorkspaceRoot};
use crate::manifest;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

/// Session slot of one project.
///
/// `notice_sent` lives inside `Active` so a recreated session starts a
/// fresh reuse-notice lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active {
        session: SessionId,
        notice_sent: bool,
    },
}

/// One workspace root, optionally backed by a package manifest.
///
/// Owns at most one live shell session at a time, created lazily on the
/// first command dispatch and recreated after the previous one was closed
/// externally.
#[derive(Debug)]
pub struct Project {
    name: String,
    root_path: PathBuf,
    manifest_path: Option<PathBuf>,
    state: Rc<RefCell<SessionState>>,
}

impl Project {
    /// Builds a project from a workspace root, probing for the manifest
    /// once at construction time.
    pub fn from_root(root: &WorkspaceRoot) -> Self {
        let manifest_path = manifest::find_manifest(&root.path);
        Self {
            name: root.name.clone(),
            root_path: root.path.clone(),
            manifest_path,
            state: Rc::new(RefCell::new(SessionState::Idle)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn manifest_path(&self) -> Option<&Path> {
        self.manifest_path.as_deref()
    }

    pub fn has_manifest(&self) -> bool {
        self.manifest_path.is_some()
    }

    pub fn session_state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Returns the project's live session, creating one on first use.
    ///
    /// A project without a manifest must never be asked for a session;
    /// that is a caller invariant violation and fails loudly.
    pub fn terminal(&self, host: &dyn ShellHost) -> Result<SessionId> {
        let manifest_path = self
            .manifest_path
            .as_deref()
            .ok_or_else(|| Error::NoManifest(self.name.clone()))?;

        if let SessionState::Active { session, .. } = *self.state.borrow() {
            return Ok(session);
        }

        let cwd = manifest_path.parent().unwrap_or(&self.root_path);
        let session = host.create_session(&self.name, cwd)?;
        *self.state.borrow_mut() = SessionState::Active {
            session,
            notice_sent: false,
        };

        // Clear the slot when the host reports this session closed, so
        // the next access recreates it.
        let slot = Rc::downgrade(&self.state);
        host.on_closed(session, Box::new(move || release_session(&slot, session)));

        debug!("Created session {session} for project '{}'", self.name);
        Ok(session)
    }

    /// Sends `command` into the project's session.
    ///
    /// The first command of a session lifetime is followed by a one-time
    /// notice that the session will be reused for this project's scripts.
    /// Shell-host failures are reported through `notifier` and not
    /// propagated; a missing manifest is.
    pub fn run_command(
        &self,
        host: &dyn ShellHost,
        notifier: &dyn Notifier,
        command: &str,
    ) -> Result<()> {
        if self.manifest_path.is_none() {
            return Err(Error::NoManifest(self.name.clone()));
        }

        if let Err(err) = self.try_send(host, command) {
            warn!("Sending '{command}' to project '{}' failed: {err}", self.name);
            notifier.error(&format!("Failed to run {command}"));
        }
        Ok(())
    }

    fn try_send(&self, host: &dyn ShellHost, command: &str) -> Result<()> {
        let session = self.terminal(host)?;
        host.show(session)?;
        host.send_text(session, command)?;

        let needs_notice = matches!(
            *self.state.borrow(),
            SessionState::Active {
                notice_sent: false,
                ..
            }
        );
        if needs_notice {
            host.send_text(session, &reuse_notice(&self.name))?;
            if let SessionState::Active { notice_sent, .. } = &mut *self.state.borrow_mut() {
                *notice_sent = true;
            }
        }
        Ok(())
    }
}

fn release_session(slot: &Weak<RefCell<SessionState>>, closed: SessionId) {
    if let Some(state) = slot.upgrade() {
        let mut state = state.borrow_mut();
        if matches!(*state, SessionState::Active { session, .. } if session == closed) {
            debug!("Session {closed} closed, releasing slot");
            *state = SessionState::Idle;
        }
    }
}

fn reuse_notice(project: &str) -> String {
    format!("echo \"Reusing this terminal for '{project}' scripts\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeNotifier, FakeShellHost};
    use std::fs;
    use tempfile::TempDir;

    fn project_with_manifest(dir: &TempDir) -> Project {
        fs::write(dir.path().join("package.json"), r#"{"scripts":{}}"#).unwrap();
        Project::from_root(&WorkspaceRoot::from_path(dir.path()))
    }

    #[test]
    fn test_terminal_requires_manifest() {
        let dir = TempDir::new().unwrap();
        let project = Project::from_root(&WorkspaceRoot::from_path(dir.path()));
        let host = FakeShellHost::default();

        let err = project.terminal(&host).unwrap_err();
        assert!(matches!(err, Error::NoManifest(_)));
        assert!(host.created.borrow().is_empty());
    }

    #[test]
    fn test_terminal_created_lazily_and_reused() {
        let dir = TempDir::new().unwrap();
        let project = project_with_manifest(&dir);
        let host = FakeShellHost::default();

        assert_eq!(project.session_state(), SessionState::Idle);

        let first = project.terminal(&host).unwrap();
        let second = project.terminal(&host).unwrap();
        assert_eq!(first, second);
        assert_eq!(host.created.borrow().len(), 1);

        let (_, name, cwd) = host.created.borrow()[0].clone();
        assert_eq!(name, project.name());
        assert_eq!(cwd, dir.path());
    }

    #[test]
    fn test_session_recreated_after_close() {
        let dir = TempDir::new().unwrap();
        let project = project_with_manifest(&dir);
        let host = FakeShellHost::default();

        let first = project.terminal(&host).unwrap();
        host.close(first);
        assert_eq!(project.session_state(), SessionState::Idle);
        assert!(!host.live.borrow().contains(&first));

        let second = project.terminal(&host).unwrap();
        assert_ne!(first, second);
        assert_eq!(host.created.borrow().len(), 2);
    }

    #[test]
    fn test_close_of_stale_session_leaves_current_one() {
        let dir = TempDir::new().unwrap();
        let project = project_with_manifest(&dir);
        let host = FakeShellHost::default();

        let first = project.terminal(&host).unwrap();
        host.close(first);
        let second = project.terminal(&host).unwrap();

        // A late close notification for the first session must not release
        // the slot now occupied by the second.
        host.fire_closed(first);
        assert_eq!(project.terminal(&host).unwrap(), second);
    }

    #[test]
    fn test_reuse_notice_sent_once_per_session() {
        let dir = TempDir::new().unwrap();
        let project = project_with_manifest(&dir);
        let host = FakeShellHost::default();
        let notifier = FakeNotifier::default();

        project.run_command(&host, &notifier, "npm run test").unwrap();
        project.run_command(&host, &notifier, "npm run build").unwrap();

        let sent = host.sent_texts();
        let notices = sent.iter().filter(|text| text.contains("Reusing")).count();
        assert_eq!(notices, 1);
        assert_eq!(sent[0], "npm run test");
        assert!(sent[1].contains("Reusing"));
        assert_eq!(sent[2], "npm run build");
        // Each run brings the session to the foreground.
        assert_eq!(host.shown.borrow().len(), 2);
        assert!(notifier.errors.borrow().is_empty());
    }

    #[test]
    fn test_reuse_notice_resets_with_new_session() {
        let dir = TempDir::new().unwrap();
        let project = project_with_manifest(&dir);
        let host = FakeShellHost::default();
        let notifier = FakeNotifier::default();

        project.run_command(&host, &notifier, "npm run test").unwrap();
        let SessionState::Active { session, .. } = project.session_state() else {
            panic!("expected an active session");
        };
        host.close(session);

        project.run_command(&host, &notifier, "npm run test").unwrap();

        let notices = host
            .sent_texts()
            .iter()
            .filter(|text| text.contains("Reusing"))
            .count();
        assert_eq!(notices, 2);
    }

    #[test]
    fn test_run_command_without_manifest_fails_fast() {
        let dir = TempDir::new().unwrap();
        let project = Project::from_root(&WorkspaceRoot::from_path(dir.path()));
        let host = FakeShellHost::default();
        let notifier = FakeNotifier::default();

        let err = project
            .run_command(&host, &notifier, "npm run test")
            .unwrap_err();
        assert!(matches!(err, Error::NoManifest(_)));
        assert!(host.created.borrow().is_empty());
    }

    #[test]
    fn test_send_failure_reported_not_propagated() {
        let dir = TempDir::new().unwrap();
        let project = project_with_manifest(&dir);
        let host = FakeShellHost::default();
        let notifier = FakeNotifier::default();

        host.fail_sends.set(true);
        project.run_command(&host, &notifier, "npm run test").unwrap();

        let errors = notifier.errors.borrow();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("npm run test"));
    }
}
