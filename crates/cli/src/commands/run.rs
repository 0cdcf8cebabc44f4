use anyhow::{Context, Result};
use scriptree_core::CommandDispatcher;
use std::rc::Rc;
use tracing::{debug, info};

use crate::commands::{build_provider, resolve_project, resolve_script, run_request};
use crate::host::{ConsoleNotifier, ProcessShellHost};

pub fn run_command(project_arg: &str, script: &str, dir: Option<&str>, dry_run: bool) -> Result<()> {
    debug!("Running script '{script}' of project '{project_arg}'");

    let provider = build_provider(dir)?;
    // Discovery pass fills the registry before any lookup.
    provider.children(None);

    let project = resolve_project(&provider, project_arg)?;
    let script_node = resolve_script(&provider, &project, script)?;
    let request = run_request(&script_node);

    if dry_run {
        println!("{}", request.command);
        return Ok(());
    }

    info!("Running: {}", request.command);
    let host = Rc::new(ProcessShellHost::new());
    let dispatcher = CommandDispatcher::new(provider, host.clone(), Rc::new(ConsoleNotifier));
    dispatcher
        .dispatch(&request)
        .with_context(|| format!("Failed to dispatch: {}", request.command))?;

    let code = host.shutdown()?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
