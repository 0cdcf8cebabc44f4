//! Two-level discovery: workspace roots → projects → scripts

use crate::config::PackageManager;
use crate::dispatch::RunRequest;
use crate::interfaces::{Notifier, SettingsStore, WorkspaceSource};
use crate::manifest;
use crate::project::Project;
use crate::types::{
    Collapsible, PlaceholderNode, ProjectNode, ScriptNode, TreeItem, TreeNode, capitalize,
};
use crate::watch::ManifestWatchSet;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, warn};

/// Placeholder and notice text shown when no root carries a manifest.
pub const NO_WORKSPACE_MESSAGE: &str = "No workspace folder contains a package.json";

/// Tree data provider over workspace roots and their manifest scripts.
///
/// Projects are keyed by root path in an order-preserving registry; a
/// rediscovery reuses the existing project for a known root so its live
/// session survives a refresh.
pub struct ScriptTreeProvider {
    workspace: Rc<dyn WorkspaceSource>,
    settings: Rc<dyn SettingsStore>,
    notifier: Rc<dyn Notifier>,
    registry: RefCell<IndexMap<PathBuf, Rc<Project>>>,
    watch_set: ManifestWatchSet,
    listeners: RefCell<Vec<Box<dyn Fn()>>>,
}

impl ScriptTreeProvider {
    pub fn new(
        workspace: Rc<dyn WorkspaceSource>,
        settings: Rc<dyn SettingsStore>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            workspace,
            settings,
            notifier,
            registry: RefCell::new(IndexMap::new()),
            watch_set: ManifestWatchSet::default(),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// The swappable set of manifest paths the save watcher matches on.
    pub fn watch_set(&self) -> ManifestWatchSet {
        self.watch_set.clone()
    }

    /// Looks up a live project by root path.
    pub fn project(&self, root: &Path) -> Option<Rc<Project>> {
        self.registry.borrow().get(root).cloned()
    }

    /// Live projects in discovery order.
    pub fn projects(&self) -> Vec<Rc<Project>> {
        self.registry.borrow().values().cloned().collect()
    }

    /// Registers a listener on the change-notification stream.
    pub fn on_did_change(&self, listener: Box<dyn Fn()>) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Signals that the whole tree must be recomputed from the root.
    pub fn refresh(&self) {
        debug!("Refreshing script tree");
        for listener in self.listeners.borrow().iter() {
            listener();
        }
    }

    /// Children of `parent`, or the root level when `None`.
    pub fn children(&self, parent: Option<&TreeNode>) -> Vec<TreeNode> {
        match parent {
            None => self.project_nodes(),
            Some(TreeNode::Project(node)) => self.script_nodes(&node.root_path),
            Some(TreeNode::Script(_)) | Some(TreeNode::Placeholder(_)) => Vec::new(),
        }
    }

    /// Renderable attributes for `node`, per the tree-data contract.
    pub fn tree_item(&self, node: &TreeNode) -> TreeItem {
        match node {
            TreeNode::Project(project) => TreeItem {
                label: project.label.clone(),
                collapsible: Collapsible::Expanded,
                action: None,
            },
            TreeNode::Script(script) => TreeItem {
                label: script.label.clone(),
                collapsible: Collapsible::None,
                action: Some(RunRequest {
                    command: script.invocation.clone(),
                    project: script.project.clone(),
                }),
            },
            TreeNode::Placeholder(placeholder) => TreeItem {
                label: placeholder.message.clone(),
                collapsible: Collapsible::None,
                action: None,
            },
        }
    }

    fn project_nodes(&self) -> Vec<TreeNode> {
        let roots = self.workspace.roots();
        if roots.is_empty() {
            self.notifier.info(NO_WORKSPACE_MESSAGE);
            return vec![TreeNode::Placeholder(PlaceholderNode {
                message: NO_WORKSPACE_MESSAGE.to_string(),
            })];
        }

        let mut registry = self.registry.borrow_mut();
        let previous = std::mem::take(&mut *registry);
        let mut manifest_paths = Vec::new();

        for root in &roots {
            // Reuse the existing project while its manifest is still
            // present; a root whose manifest disappeared is rebuilt and
            // filtered like a new one.
            let project = match previous.get(&root.path) {
                Some(existing) if manifest::find_manifest(&root.path).is_some() => {
                    existing.clone()
                }
                _ => Rc::new(Project::from_root(root)),
            };
            match project.manifest_path() {
                Some(path) => {
                    manifest_paths.push(path.to_path_buf());
                    registry.insert(root.path.clone(), project);
                }
                None => debug!("Ignoring root without manifest: {}", root.path.display()),
            }
        }

        self.watch_set.replace(manifest_paths);
        debug!("Discovered {} projects", registry.len());

        registry
            .values()
            .map(|project| {
                TreeNode::Project(ProjectNode {
                    label: project.name().to_string(),
                    root_path: project.root_path().to_path_buf(),
                })
            })
            .collect()
    }

    fn script_nodes(&self, root: &Path) -> Vec<TreeNode> {
        let Some(project) = self.project(root) else {
            warn!("Script listing requested for unknown root {}", root.display());
            return Vec::new();
        };
        let Some(manifest_path) = project.manifest_path() else {
            return Vec::new();
        };

        let scripts = match manifest::read_scripts(manifest_path) {
            Ok(scripts) => scripts,
            Err(err) => {
                warn!("{err}");
                return vec![TreeNode::Placeholder(PlaceholderNode {
                    message: format!("Failed to read scripts for '{}'", project.name()),
                })];
            }
        };

        // The package-manager preference is read fresh for every build of
        // the script list.
        let manager = self.settings.package_manager();
        scripts
            .keys()
            .map(|name| TreeNode::Script(build_script_node(name, manager, root)))
            .collect()
    }
}

fn build_script_node(name: &str, manager: PackageManager, root: &Path) -> ScriptNode {
    ScriptNode {
        label: capitalize(name),
        invocation: manager.invocation(name),
        project: root.to_path_buf(),
    }
}
