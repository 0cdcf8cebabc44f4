pub mod list;
pub mod run;
pub mod watch;

pub use list::list_command;
pub use run::run_command;
pub use watch::watch_command;

use crate::host::{ConsoleNotifier, DirWorkspaceSource, FileSettings};
use anyhow::{Context, Result, anyhow};
use scriptree_core::{Project, ScriptNode, ScriptTreeProvider, TreeNode, manifest};
use std::path::PathBuf;
use std::rc::Rc;

pub(crate) fn resolve_base(dir: Option<&str>) -> Result<PathBuf> {
    let base = match dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };
    std::fs::canonicalize(&base)
        .with_context(|| format!("No such directory: {}", base.display()))
}

pub(crate) fn build_provider(dir: Option<&str>) -> Result<Rc<ScriptTreeProvider>> {
    let base = resolve_base(dir)?;
    Ok(Rc::new(ScriptTreeProvider::new(
        Rc::new(DirWorkspaceSource::new(&base)),
        Rc::new(FileSettings::new(&base)),
        Rc::new(ConsoleNotifier),
    )))
}

/// Matches a discovered project by root name, root path, or the `name`
/// declared in its manifest.
pub(crate) fn resolve_project(
    provider: &ScriptTreeProvider,
    project_arg: &str,
) -> Result<Rc<Project>> {
    let as_path = std::fs::canonicalize(project_arg).unwrap_or_else(|_| PathBuf::from(project_arg));
    provider
        .projects()
        .into_iter()
        .find(|project| {
            project.name() == project_arg
                || project.root_path() == as_path
                || project.manifest_path().is_some_and(|path| {
                    manifest::package_name(path).ok().flatten().as_deref() == Some(project_arg)
                })
        })
        .ok_or_else(|| anyhow!("No project '{project_arg}' in this workspace"))
}

/// Finds the script node for `script` inside the given project subtree.
pub(crate) fn resolve_script(
    provider: &ScriptTreeProvider,
    project: &Project,
    script: &str,
) -> Result<ScriptNode> {
    let parent = project_node(project);
    provider
        .children(Some(&parent))
        .into_iter()
        .find_map(|node| match node {
            TreeNode::Script(node) if node.label.eq_ignore_ascii_case(script) => Some(node),
            _ => None,
        })
        .ok_or_else(|| {
            anyhow!(
                "No script '{script}' in project '{}'",
                project.name()
            )
        })
}

pub(crate) fn project_node(project: &Project) -> TreeNode {
    TreeNode::Project(scriptree_core::ProjectNode {
        label: project.name().to_string(),
        root_path: project.root_path().to_path_buf(),
    })
}

pub(crate) fn run_request(script: &ScriptNode) -> scriptree_core::RunRequest {
    scriptree_core::RunRequest {
        command: script.invocation.clone(),
        project: script.project.clone(),
    }
}
