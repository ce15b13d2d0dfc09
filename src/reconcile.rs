//! Bring `update.conf` and locksmithd in line with a requested strategy.
//!
//! ```text
//!  "off"  ──► mask unit ──► daemon-reload ──► stop
//!  other  ──► write update.conf ──► daemon-reload ──► restart
//! ```
//!
//! Steps run in order and the first failure ends the run.  The config write
//! and the service commands are not transactional: a failed restart leaves
//! the new `update.conf` in place until the next successful run.
use std::path::Path;

use crate::config::merge_strategy;
use crate::error::{LocksmithError, ReconcileError};
use crate::service::{LOCKSMITH_UNIT, ServiceControl, UnitCommand};
use crate::strategy::{Step, StrategyRequest};

/// Decode `strategy` and reconcile against `root`.
///
/// # Errors
///
/// Returns [`LocksmithError::Strategy`] if `strategy` cannot be decoded, or
/// [`LocksmithError::Reconcile`] naming the step that failed.
pub fn reconcile_strategy(
    strategy: &str,
    root: &Path,
    control: &dyn ServiceControl,
) -> Result<(), LocksmithError> {
    let request: StrategyRequest = strategy.parse()?;
    reconcile(&request, root, control)?;
    Ok(())
}

/// Reconcile an already decoded request.
///
/// The restart on the apply path is unconditional; it is not skipped when
/// `update.conf` already held the value.
///
/// # Errors
///
/// Returns a [`ReconcileError`] for the first step that fails.
pub fn reconcile(
    request: &StrategyRequest,
    root: &Path,
    control: &dyn ServiceControl,
) -> Result<(), ReconcileError> {
    let command = match request {
        StrategyRequest::Disable => {
            control
                .mask_unit(LOCKSMITH_UNIT, root)
                .map_err(|source| ReconcileError::Mask {
                    unit: LOCKSMITH_UNIT.to_string(),
                    source,
                })?;
            UnitCommand::Stop
        }
        StrategyRequest::Apply(value) => {
            merge_strategy(value, root)?;
            UnitCommand::Restart
        }
    };

    control
        .daemon_reload()
        .map_err(ReconcileError::DaemonReload)?;
    control
        .run_unit_command(command, LOCKSMITH_UNIT)
        .map_err(|source| ReconcileError::UnitCommand {
            command,
            unit: LOCKSMITH_UNIT.to_string(),
            source,
        })?;
    Ok(())
}

impl ReconcileError {
    /// The step that failed.
    #[must_use]
    pub const fn step(&self) -> Step {
        match self {
            Self::Merge(_) => Step::WriteConfig,
            Self::Mask { .. } => Step::MaskUnit,
            Self::DaemonReload(_) => Step::DaemonReload,
            Self::UnitCommand { command, .. } => Step::RunUnit(*command),
        }
    }
}
