//! Step entries recorded for the end-of-run summary.

/// Step result for summary reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEntry {
    /// Human-readable step name.
    pub name: String,
    /// Final status of the step.
    pub status: StepStatus,
    /// Optional detail message (e.g., error description).
    pub message: Option<String>,
}

/// Status of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Step completed successfully.
    Ok,
    /// Step was not reached because an earlier step failed.
    Skipped,
    /// Step was only planned; nothing was changed.
    DryRun,
    /// Step failed.
    Failed,
}

impl StepStatus {
    /// Marker printed in front of the step name.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Ok => "✓",
            Self::Skipped => "○",
            Self::DryRun => "~",
            Self::Failed => "✗",
        }
    }
}
