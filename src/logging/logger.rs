//! Logging façade with stage markers and a step summary.
use std::sync::Mutex;

use super::types::{StepEntry, StepStatus};

/// Target for stage headers.
pub(super) const STAGE_TARGET: &str = "locksmith_strategy::stage";

/// Target for dry-run action messages.
pub(super) const DRY_RUN_TARGET: &str = "locksmith_strategy::dry_run";

/// Structured logger used by commands.
///
/// Each message method emits one [`tracing`] event; formatting and filtering
/// are left to the installed subscriber.  Step results recorded with
/// [`record_step`](Self::record_step) are printed by
/// [`print_summary`](Self::print_summary).
#[derive(Debug, Default)]
pub struct Logger {
    steps: Mutex<Vec<StepEntry>>,
}

impl Logger {
    /// Create a new logger with no recorded steps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a step result for the summary.
    pub fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.steps.lock() {
            guard.push(StepEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Steps recorded so far.
    #[must_use]
    pub fn steps(&self) -> Vec<StepEntry> {
        self.steps
            .lock()
            .map_or_else(|_| Vec::new(), |guard| guard.clone())
    }

    /// Print the recorded steps and a one-line tally.  Does nothing when no
    /// step was recorded.
    pub fn print_summary(&self) {
        let steps = self.steps();
        if steps.is_empty() {
            return;
        }

        self.stage("Summary");
        let mut failed = 0usize;
        for step in &steps {
            if step.status == StepStatus::Failed {
                failed += 1;
            }
            let suffix = step
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            self.info(&format!("{} {}{suffix}", step.status.icon(), step.name));
        }
        self.info(&format!("{} steps, {failed} failed", steps.len()));
    }
}
