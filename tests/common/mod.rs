// Shared helpers for integration tests.
//
// Provides a temporary root with the `update.conf` layout and a recording
// executor so the real `SystemdServiceControl` can run without touching the
// host service manager.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use locksmith_strategy::config::FilePaths;
use locksmith_strategy::exec::{ExecResult, Executor};
use locksmith_strategy::service::systemd::SystemdServiceControl;

/// Packaged default written by [`TestRoot::with_default_template`].
pub const DEFAULT_TEMPLATE: &str = "GROUP=stable\nREBOOT_STRATEGY=best-effort\n";

/// An isolated filesystem root backed by a [`tempfile::TempDir`].
pub struct TestRoot {
    /// Temporary directory standing in for `/`.
    pub dir: tempfile::TempDir,
    /// `update.conf` paths under [`dir`](Self::dir).
    pub paths: FilePaths,
}

impl TestRoot {
    /// Create an empty root.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let paths = FilePaths::new(dir.path());
        Self { dir, paths }
    }

    /// Create a root with [`DEFAULT_TEMPLATE`] as the packaged default.
    pub fn with_default_template() -> Self {
        Self::new().fallback(DEFAULT_TEMPLATE)
    }

    /// Write the packaged default.
    pub fn fallback(self, content: &str) -> Self {
        write(&self.paths.fallback, content);
        self
    }

    /// Write `etc/coreos/update.conf`.
    pub fn primary(self, content: &str) -> Self {
        write(&self.paths.primary, content);
        self
    }

    /// Path of the root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Content of `etc/coreos/update.conf`.
    pub fn read_primary(&self) -> String {
        fs::read_to_string(&self.paths.primary).expect("read update.conf")
    }

    /// Entries in `etc/coreos`, sorted.
    pub fn config_dir_entries(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(&self.paths.dir) else {
            return Vec::new();
        };
        let mut entries: Vec<PathBuf> = entries
            .map(|e| e.expect("read dir entry").path())
            .collect();
        entries.sort();
        entries
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().expect("parent dir")).expect("create dir");
    fs::write(path, content).expect("write file");
}

/// Executor that records every command and never spawns a process.
///
/// A command whose arguments contain `fail_on` exits with status 1.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<Vec<String>>>,
    fail_on: Option<String>,
}

impl RecordingExecutor {
    /// Executor where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor where commands containing the argument `arg` fail.
    pub fn failing_on(arg: &str) -> Self {
        Self {
            fail_on: Some(arg.to_string()),
            ..Self::default()
        }
    }

    /// Commands run so far, program first.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl Executor for RecordingExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().map(ToString::to_string));
        self.calls.lock().expect("calls lock").push(call);

        let failed = self
            .fail_on
            .as_deref()
            .is_some_and(|arg| args.contains(&arg));
        Ok(if failed {
            ExecResult {
                stdout: String::new(),
                stderr: format!("Failed to {}: simulated\n", args.join(" ")),
                success: false,
                code: Some(1),
            }
        } else {
            ExecResult {
                success: true,
                code: Some(0),
                ..ExecResult::default()
            }
        })
    }

    fn which(&self, _program: &str) -> bool {
        true
    }
}

/// A [`SystemdServiceControl`] over `executor`.
pub fn systemd_control(executor: &Arc<RecordingExecutor>) -> SystemdServiceControl {
    SystemdServiceControl::new(Arc::clone(executor) as Arc<dyn Executor>)
}

/// Expected recorded command.
pub fn systemctl(args: &[&str]) -> Vec<String> {
    std::iter::once("systemctl")
        .chain(args.iter().copied())
        .map(String::from)
        .collect()
}
