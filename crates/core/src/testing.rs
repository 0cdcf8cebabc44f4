//! Shared in-crate fakes for the host seams

use crate::config::PackageManager;
use crate::error::{Error, Result};
use crate::interfaces::{
    Notifier, SessionId, SettingsStore, ShellHost, WorkspaceRoot, WorkspaceSource,
};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Shell host double recording every interaction and able to simulate
/// external session closes.
#[derive(Default)]
pub struct FakeShellHost {
    next_id: Cell<u64>,
    pub created: RefCell<Vec<(SessionId, String, PathBuf)>>,
    pub shown: RefCell<Vec<SessionId>>,
    pub sent: RefCell<Vec<(SessionId, String)>>,
    pub live: RefCell<HashSet<SessionId>>,
    callbacks: RefCell<HashMap<SessionId, Vec<Box<dyn Fn()>>>>,
    pub fail_sends: Cell<bool>,
}

impl FakeShellHost {
    /// Simulates the user closing a session.
    pub fn close(&self, session: SessionId) {
        self.live.borrow_mut().remove(&session);
        self.fire_closed(session);
    }

    /// Fires the close callbacks registered for `session`, without
    /// touching liveness; lets tests replay stale notifications.
    pub fn fire_closed(&self, session: SessionId) {
        let callbacks = self.callbacks.borrow();
        if let Some(registered) = callbacks.get(&session) {
            for callback in registered {
                callback();
            }
        }
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent.borrow().iter().map(|(_, text)| text.clone()).collect()
    }
}

impl ShellHost for FakeShellHost {
    fn create_session(&self, name: &str, cwd: &Path) -> Result<SessionId> {
        let id = SessionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.created
            .borrow_mut()
            .push((id, name.to_string(), cwd.to_path_buf()));
        self.live.borrow_mut().insert(id);
        Ok(id)
    }

    fn show(&self, session: SessionId) -> Result<()> {
        self.shown.borrow_mut().push(session);
        Ok(())
    }

    fn send_text(&self, session: SessionId, text: &str) -> Result<()> {
        if self.fail_sends.get() {
            return Err(Error::SessionError("send failed".to_string()));
        }
        self.sent.borrow_mut().push((session, text.to_string()));
        Ok(())
    }

    fn on_closed(&self, session: SessionId, callback: Box<dyn Fn()>) {
        self.callbacks
            .borrow_mut()
            .entry(session)
            .or_default()
            .push(callback);
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    pub infos: RefCell<Vec<String>>,
    pub errors: RefCell<Vec<String>>,
}

impl Notifier for FakeNotifier {
    fn info(&self, message: &str) {
        self.infos.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

#[derive(Default)]
pub struct FakeSettings {
    pub manager: Cell<PackageManager>,
}

impl SettingsStore for FakeSettings {
    fn package_manager(&self) -> PackageManager {
        self.manager.get()
    }
}

pub struct FixedWorkspace {
    roots: RefCell<Vec<WorkspaceRoot>>,
}

impl FixedWorkspace {
    pub fn new(roots: Vec<WorkspaceRoot>) -> Self {
        Self {
            roots: RefCell::new(roots),
        }
    }

    pub fn set_roots(&self, roots: Vec<WorkspaceRoot>) {
        *self.roots.borrow_mut() = roots;
    }
}

impl WorkspaceSource for FixedWorkspace {
    fn roots(&self) -> Vec<WorkspaceRoot> {
        self.roots.borrow().clone()
    }
}
