//! Shell sessions backed by long-lived shell child processes

use scriptree_core::{Error, Result, SessionId, ShellHost};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use tracing::{debug, info, warn};

struct ShellSession {
    name: String,
    child: Child,
}

/// Shell host whose sessions are `$SHELL` child processes with piped
/// stdin. Command text written into a session is executed by that shell;
/// output goes straight to the inherited stdout/stderr.
pub struct ProcessShellHost {
    shell: String,
    next_id: Cell<u64>,
    sessions: RefCell<HashMap<SessionId, ShellSession>>,
    callbacks: RefCell<HashMap<SessionId, Vec<Box<dyn Fn()>>>>,
}

impl ProcessShellHost {
    pub fn new() -> Self {
        let shell = std::env::var("SHELL").unwrap_or_else(|_| "sh".to_string());
        Self {
            shell,
            next_id: Cell::new(0),
            sessions: RefCell::new(HashMap::new()),
            callbacks: RefCell::new(HashMap::new()),
        }
    }

    /// Number of currently live sessions.
    pub fn live_sessions(&self) -> usize {
        self.sessions.borrow().len()
    }

    /// Drops sessions whose shell process has exited and fires their
    /// registered close callbacks.
    pub fn reap(&self) {
        let mut exited = Vec::new();
        {
            let mut sessions = self.sessions.borrow_mut();
            sessions.retain(|id, session| match session.child.try_wait() {
                Ok(Some(status)) => {
                    debug!("Session {id} ('{}') exited: {status}", session.name);
                    exited.push(*id);
                    false
                }
                Ok(None) => true,
                Err(err) => {
                    warn!("Session {id} wait failed: {err}");
                    exited.push(*id);
                    false
                }
            });
        }
        for id in exited {
            let callbacks = self.callbacks.borrow_mut().remove(&id);
            for callback in callbacks.unwrap_or_default() {
                callback();
            }
        }
    }

    /// Closes stdin of every session and waits for the shells to finish.
    /// Returns the first non-zero exit code, if any.
    pub fn shutdown(&self) -> Result<i32> {
        let sessions: Vec<(SessionId, ShellSession)> =
            self.sessions.borrow_mut().drain().collect();
        let mut worst = 0;
        for (id, mut session) in sessions {
            drop(session.child.stdin.take());
            let status = session.child.wait()?;
            debug!("Session {id} ('{}') finished: {status}", session.name);
            if !status.success() && worst == 0 {
                worst = status.code().unwrap_or(1);
            }
        }
        Ok(worst)
    }
}

impl Default for ProcessShellHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellHost for ProcessShellHost {
    fn create_session(&self, name: &str, cwd: &Path) -> Result<SessionId> {
        let mut command = Command::new(&self.shell);
        command.current_dir(cwd).stdin(Stdio::piped());
        let child = command
            .spawn()
            .map_err(|e| Error::SessionError(format!("Failed to start {}: {e}", self.shell)))?;

        let id = SessionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        info!("Started session {id} ('{name}') in {}", cwd.display());
        self.sessions.borrow_mut().insert(
            id,
            ShellSession {
                name: name.to_string(),
                child,
            },
        );
        Ok(id)
    }

    fn show(&self, session: SessionId) -> Result<()> {
        let sessions = self.sessions.borrow();
        let entry = sessions
            .get(&session)
            .ok_or_else(|| Error::SessionError(format!("No live session {session}")))?;
        // A plain terminal has no window stack to raise; announce instead.
        info!("Session {session} ('{}') is receiving commands", entry.name);
        Ok(())
    }

    fn send_text(&self, session: SessionId, text: &str) -> Result<()> {
        let mut sessions = self.sessions.borrow_mut();
        let entry = sessions
            .get_mut(&session)
            .ok_or_else(|| Error::SessionError(format!("No live session {session}")))?;
        let stdin = entry
            .child
            .stdin
            .as_mut()
            .ok_or_else(|| Error::SessionError(format!("Session {session} has no input")))?;
        writeln!(stdin, "{text}")
            .and_then(|_| stdin.flush())
            .map_err(|e| Error::SessionError(format!("Write to session {session} failed: {e}")))
    }

    fn on_closed(&self, session: SessionId, callback: Box<dyn Fn()>) {
        self.callbacks
            .borrow_mut()
            .entry(session)
            .or_default()
            .push(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[test]
    fn test_session_runs_sent_commands() {
        let dir = TempDir::new().unwrap();
        let host = ProcessShellHost::new();

        let session = host.create_session("app", dir.path()).unwrap();
        host.show(session).unwrap();
        host.send_text(session, "echo scriptree > marker.txt").unwrap();

        assert_eq!(host.shutdown().unwrap(), 0);
        let marker = std::fs::read_to_string(dir.path().join("marker.txt")).unwrap();
        assert_eq!(marker.trim(), "scriptree");
    }

    #[test]
    fn test_reap_fires_close_callbacks() {
        let dir = TempDir::new().unwrap();
        let host = ProcessShellHost::new();

        let session = host.create_session("app", dir.path()).unwrap();
        let closed = Rc::new(Cell::new(false));
        let flag = closed.clone();
        host.on_closed(session, Box::new(move || flag.set(true)));

        host.send_text(session, "exit 0").unwrap();
        // The shell needs a moment to act on the exit.
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while host.live_sessions() > 0 && std::time::Instant::now() < deadline {
            host.reap();
            std::thread::sleep(std::time::Duration::from_millis(20));
        }

        assert_eq!(host.live_sessions(), 0);
        assert!(closed.get());
    }

    #[test]
    fn test_send_to_unknown_session() {
        let host = ProcessShellHost::new();
        let err = host.send_text(SessionId(42), "echo hi").unwrap_err();
        assert!(matches!(err, Error::SessionError(_)));
    }
}
