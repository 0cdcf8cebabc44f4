use crate::error::Result;
use std::fmt;
use std::path::Path;

/// Identity of one live shell session, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Interactive shell host: creates, shows, and writes into terminal
/// sessions, and reports when one is closed externally.
pub trait ShellHost {
    /// Creates a session named `name` with `cwd` as its working directory.
    fn create_session(&self, name: &str, cwd: &Path) -> Result<SessionId>;

    /// Brings the session to the foreground.
    fn show(&self, session: SessionId) -> Result<()>;

    /// Writes one line of command text into the session.
    fn send_text(&self, session: SessionId, text: &str) -> Result<()>;

    /// Registers a callback fired when `session` is closed, whether by
    /// the user or by the host itself.
    fn on_closed(&self, session: SessionId, callback: Box<dyn Fn()>);
}
