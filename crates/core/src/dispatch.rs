//! Script invocation requests coming back from the rendering layer

use crate::error::{Error, Result};
use crate::interfaces::{Notifier, ShellHost};
use crate::provider::ScriptTreeProvider;
use serde::Serialize;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::debug;

/// Payload attached to a script node's action: the composed command text
/// and the root path of the owning project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRequest {
    pub command: String,
    pub project: PathBuf,
}

/// Single action target for script invocations.
pub struct CommandDispatcher {
    provider: Rc<ScriptTreeProvider>,
    host: Rc<dyn ShellHost>,
    notifier: Rc<dyn Notifier>,
}

impl CommandDispatcher {
    pub fn new(
        provider: Rc<ScriptTreeProvider>,
        host: Rc<dyn ShellHost>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            provider,
            host,
            notifier,
        }
    }

    /// Resolves the target project and sends the command into its session.
    pub fn dispatch(&self, request: &RunRequest) -> Result<()> {
        debug!(
            "Dispatching '{}' for {}",
            request.command,
            request.project.display()
        );
        let project = self
            .provider
            .project(&request.project)
            .ok_or_else(|| Error::ProjectNotFound(request.project.display().to_string()))?;
        project.run_command(self.host.as_ref(), self.notifier.as_ref(), &request.command)
    }
}
