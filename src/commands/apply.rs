//! Command: apply a reboot strategy.
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::{ApplyOpts, GlobalOpts};
use crate::config::FilePaths;
use crate::config::paths::effective_root;
use crate::error::ReconcileError;
use crate::exec::SystemExecutor;
use crate::logging::{Logger, StepStatus};
use crate::reconcile::reconcile;
use crate::resources::{Resource, StrategyResource, UnitMaskResource};
use crate::service::systemd::SystemdServiceControl;
use crate::service::{LOCKSMITH_UNIT, ServiceControl};
use crate::strategy::{Step, StrategyRequest};

/// Run the apply command against the live service manager.
///
/// # Errors
///
/// Returns an error if the strategy is invalid or any reconciliation step
/// fails.
pub fn run(global: &GlobalOpts, opts: &ApplyOpts, log: &Logger) -> Result<()> {
    let control = SystemdServiceControl::new(Arc::new(SystemExecutor));
    if !global.dry_run && !control.available() {
        log.warn("systemctl not found on PATH; service steps will fail");
    }
    run_with(global, opts, log, &control)
}

/// Run the apply command with an explicit service control.
///
/// # Errors
///
/// Returns an error if the strategy is invalid, the current state cannot be
/// read for a dry run, or any reconciliation step fails.
pub fn run_with(
    global: &GlobalOpts,
    opts: &ApplyOpts,
    log: &Logger,
    control: &dyn ServiceControl,
) -> Result<()> {
    let request: StrategyRequest = opts
        .strategy
        .parse()
        .context("invalid reboot strategy")?;
    let root = effective_root(&global.root);

    log.stage(&format!("Applying reboot strategy {request}"));
    log.debug(&format!("root: {}", root.display()));

    if global.dry_run {
        for step in request.plan() {
            let (description, changes) = describe_step(*step, &request, root)?;
            log.dry_run(&description);
            let note = (!changes).then_some("already in place");
            log.record_step(&step.to_string(), StepStatus::DryRun, note);
        }
        log.print_summary();
        return Ok(());
    }

    let result = reconcile(&request, root, control);
    record_outcome(request.plan(), result.as_ref().err(), log);
    log.print_summary();
    result.with_context(|| format!("failed to apply reboot strategy {request}"))
}

/// Render a planned step together with the state it would change, and
/// whether running it would change anything on disk.
///
/// Service manager steps always count as a change.
fn describe_step(step: Step, request: &StrategyRequest, root: &Path) -> Result<(String, bool)> {
    Ok(match step {
        Step::MaskUnit => {
            let mask = UnitMaskResource::new(LOCKSMITH_UNIT.to_string(), root.to_path_buf());
            describe_resource("mask", &mask)?
        }
        Step::WriteConfig => {
            let value = request.value().unwrap_or_default();
            let resource = StrategyResource::new(FilePaths::new(root), value.to_string());
            describe_resource("set", &resource)?
        }
        Step::DaemonReload => ("would reload unit definitions".to_string(), true),
        Step::RunUnit(command) => (format!("would {command} {LOCKSMITH_UNIT}"), true),
    })
}

fn describe_resource(verb: &str, resource: &dyn Resource) -> Result<(String, bool)> {
    let state = resource.current_state()?;
    let description = format!(
        "would {verb} {} ({})",
        resource.description(),
        state.label()
    );
    Ok((description, resource.needs_change()?))
}

/// Record every planned step: those before the failure as ok, the failing
/// one as failed, and the rest as skipped.
fn record_outcome(plan: &[Step], error: Option<&ReconcileError>, log: &Logger) {
    let failed_at = error.map(ReconcileError::step);
    let mut failed = false;
    for step in plan {
        let name = step.to_string();
        if failed {
            log.record_step(&name, StepStatus::Skipped, None);
        } else if failed_at == Some(*step) {
            failed = true;
            let message = error.and_then(|e| std::error::Error::source(e).map(ToString::to_string));
            log.record_step(&name, StepStatus::Failed, message.as_deref());
        } else {
            log.record_step(&name, StepStatus::Ok, None);
        }
    }
}
