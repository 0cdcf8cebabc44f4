//! Interactive mode: the tree re-renders when a tracked manifest is
//! saved, and scripts run in reusable per-project shell sessions.

use anyhow::{Context, Result};
use notify::{RecursiveMode, Watcher};
use scriptree_core::{CommandDispatcher, SaveWatcher, ScriptTreeProvider};
use std::cell::Cell;
use std::io::BufRead;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use crate::commands::{build_provider, resolve_project, resolve_script, run_request};
use crate::display::print_tree;
use crate::host::{ConsoleNotifier, ProcessShellHost};

enum Event {
    Saved(PathBuf),
    Input(String),
    Eof,
}

pub fn watch_command(dir: Option<&str>) -> Result<()> {
    let provider = build_provider(dir)?;
    let host = Rc::new(ProcessShellHost::new());
    let dispatcher =
        CommandDispatcher::new(provider.clone(), host.clone(), Rc::new(ConsoleNotifier));

    let needs_render = Rc::new(Cell::new(true));
    {
        let flag = needs_render.clone();
        provider.on_did_change(Box::new(move || flag.set(true)));
    }

    let save_watcher = {
        let provider = provider.clone();
        SaveWatcher::new(provider.watch_set(), Box::new(move || provider.refresh()))
    };

    // Manifest events arrive on the notify thread and stdin lines on a
    // reader thread; both are bridged onto this loop through one channel.
    let (tx, rx) = mpsc::channel::<Event>();

    let watcher_tx = tx.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            for path in event.paths {
                let _ = watcher_tx.send(Event::Saved(path));
            }
        }
    })
    .context("Failed to start the manifest watcher")?;

    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Event::Input(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Event::Eof);
    });

    let mut watched: Vec<PathBuf> = Vec::new();
    loop {
        host.reap();
        if needs_render.get() {
            needs_render.set(false);
            print_tree(&provider);
            resubscribe(&mut watcher, &mut watched, provider.watch_set().paths());
            println!();
            println!("commands: run <project> <script> | refresh | quit");
        }

        match rx.recv_timeout(Duration::from_millis(500)) {
            Ok(Event::Saved(path)) => save_watcher.document_saved(&path),
            Ok(Event::Input(line)) => {
                if !handle_input(&provider, &dispatcher, line.trim()) {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    host.shutdown()?;
    Ok(())
}

/// Handles one input line; returns `false` when the loop should end.
fn handle_input(
    provider: &ScriptTreeProvider,
    dispatcher: &CommandDispatcher,
    line: &str,
) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] | ["refresh"] => provider.refresh(),
        ["quit"] | ["q"] | ["exit"] => return false,
        ["run", project, script] => run_script(provider, dispatcher, project, script),
        _ => eprintln!("error: unrecognized command '{line}'"),
    }
    true
}

fn run_script(
    provider: &ScriptTreeProvider,
    dispatcher: &CommandDispatcher,
    project_arg: &str,
    script: &str,
) {
    let outcome = resolve_project(provider, project_arg)
        .and_then(|project| resolve_script(provider, &project, script))
        .map(|node| run_request(&node))
        .and_then(|request| dispatcher.dispatch(&request).map_err(Into::into));
    if let Err(err) = outcome {
        eprintln!("error: {err}");
    }
}

/// Points the OS watcher at the parent directories of the tracked
/// manifests. Editors often replace files on save, which silently ends a
/// watch on the file itself; directory events still carry the manifest
/// path, and the save watcher's match set filters out everything else.
fn resubscribe(
    watcher: &mut notify::RecommendedWatcher,
    watched: &mut Vec<PathBuf>,
    manifest_paths: Vec<PathBuf>,
) {
    for dir in watched.drain(..) {
        let _ = watcher.unwatch(&dir);
    }
    for dir in manifest_paths.iter().filter_map(|path| path.parent()) {
        if watched.iter().any(|existing| existing == dir) {
            continue;
        }
        match watcher.watch(dir, RecursiveMode::NonRecursive) {
            Ok(()) => watched.push(dir.to_path_buf()),
            Err(err) => warn!("Cannot watch {}: {err}", dir.display()),
        }
    }
    debug!("Watching {} project directories", watched.len());
}
