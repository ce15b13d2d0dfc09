//! External command execution behind an injectable [`Executor`].
use anyhow::{Context as _, Result};
use std::process::{Command, Output};

/// Result of a command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited successfully.
    pub success: bool,
    /// Exit code, if the process was not terminated by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Abstraction over process execution.
///
/// Service control goes through this trait so that unit tests can observe the
/// exact commands issued without a running service manager.  The production
/// implementation is [`SystemExecutor`].
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run a command, allowing failure (returns result without bailing).
    ///
    /// # Errors
    ///
    /// Returns an error only if the program cannot be spawned.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Check if a program is available on PATH.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute: {program}"))?;

        Ok(ExecResult::from(output))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Shared test helpers for code that drives an [`Executor`].
#[cfg(test)]
pub mod test_helpers {
    use super::{ExecResult, Executor};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// A queue-driven mock executor that records every invocation.
    ///
    /// Responses are `(success, stdout, stderr)` triples consumed in FIFO
    /// order.  When the queue is empty any call succeeds with empty output.
    /// A response whose `stdout` is `"<spawn error>"` simulates a program
    /// that cannot be executed.
    #[derive(Debug, Default)]
    pub struct MockExecutor {
        responses: Mutex<VecDeque<(bool, String, String)>>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    /// Sentinel stdout that makes the mock fail as if spawning failed.
    pub const SPAWN_ERROR: &str = "<spawn error>";

    impl MockExecutor {
        /// Create a mock where every call succeeds.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a mock from an ordered list of `(success, stdout, stderr)`.
        #[must_use]
        pub fn with_responses(responses: Vec<(bool, &str, &str)>) -> Self {
            Self {
                responses: Mutex::new(
                    responses
                        .into_iter()
                        .map(|(ok, out, err)| (ok, out.to_string(), err.to_string()))
                        .collect(),
                ),
                calls: Mutex::default(),
            }
        }

        /// Every recorded invocation as `[program, args...]`.
        #[must_use]
        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls
                .lock()
                .map_or_else(|_| vec![], |guard| guard.clone())
        }

        fn next(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
            if let Ok(mut calls) = self.calls.lock() {
                let mut call = vec![program.to_string()];
                call.extend(args.iter().map(ToString::to_string));
                calls.push(call);
            }
            let (success, stdout, stderr) = self
                .responses
                .lock()
                .ok()
                .and_then(|mut guard| guard.pop_front())
                .unwrap_or_else(|| (true, String::new(), String::new()));
            if stdout == SPAWN_ERROR {
                anyhow::bail!("failed to execute: {program}");
            }
            Ok(ExecResult {
                stdout,
                stderr,
                success,
                code: Some(i32::from(!success)),
            })
        }
    }

    impl Executor for MockExecutor {
        fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
            self.next(program, args)
        }

        fn which(&self, _: &str) -> bool {
            true
        }
    }
}
