//! [`ServiceControl`] backed by `systemctl` and on-disk unit masks.
use std::fs;
use std::io;
use std::os::unix::fs::DirBuilderExt as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{ServiceControl, UnitCommand};
use crate::config::paths::effective_root;
use crate::error::ServiceError;
use crate::exec::{ExecResult, Executor};

/// Service manager client program.
pub const SYSTEMCTL: &str = "systemctl";

/// Target of a masked unit link.
const MASK_TARGET: &str = "/dev/null";

/// Path of the mask link for `unit` under `root`.
#[must_use]
pub fn masked_unit_path(unit: &str, root: &Path) -> PathBuf {
    effective_root(root)
        .join("etc")
        .join("systemd")
        .join("system")
        .join(unit)
}

/// Whether `unit` is masked under `root`.
#[must_use]
pub fn is_masked(unit: &str, root: &Path) -> bool {
    fs::read_link(masked_unit_path(unit, root)).is_ok_and(|target| target == Path::new(MASK_TARGET))
}

/// Production [`ServiceControl`].
///
/// Masking writes `R/etc/systemd/system/<unit> -> /dev/null` directly so it
/// works against an alternate root; reload and lifecycle commands go through
/// `systemctl` on the running system.
#[derive(Debug, Clone)]
pub struct SystemdServiceControl {
    executor: Arc<dyn Executor>,
}

impl SystemdServiceControl {
    /// Create a service control that runs commands through `executor`.
    #[must_use]
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }

    /// Whether `systemctl` is on PATH.
    #[must_use]
    pub fn available(&self) -> bool {
        self.executor.which(SYSTEMCTL)
    }

    fn systemctl(&self, args: &[&str]) -> Result<ExecResult, ServiceError> {
        let result = self
            .executor
            .run_unchecked(SYSTEMCTL, args)
            .map_err(|e| ServiceError::Spawn {
                program: SYSTEMCTL.to_string(),
                source: e.into(),
            })?;
        if !result.success {
            return Err(ServiceError::ExecutionFailed {
                program: SYSTEMCTL.to_string(),
                exit_code: result.code.unwrap_or(-1),
                stderr: result.stderr.trim().to_string(),
            });
        }
        Ok(result)
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ServiceError + use<> {
    let path = path.to_path_buf();
    move |source| ServiceError::Io { path, source }
}

impl ServiceControl for SystemdServiceControl {
    fn mask_unit(&self, unit: &str, root: &Path) -> Result<(), ServiceError> {
        let path = masked_unit_path(unit, root);

        if let Some(dir) = path.parent() {
            fs::DirBuilder::new()
                .recursive(true)
                .mode(crate::config::merge::DIR_MODE)
                .create(dir)
                .map_err(io_error(dir))?;
        }

        if is_masked(unit, root) {
            return Ok(());
        }
        match fs::symlink_metadata(&path) {
            Ok(_) => fs::remove_file(&path).map_err(io_error(&path))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(io_error(&path)(e)),
        }
        std::os::unix::fs::symlink(MASK_TARGET, &path).map_err(io_error(&path))
    }

    fn daemon_reload(&self) -> Result<(), ServiceError> {
        self.systemctl(&["daemon-reload"]).map(|_| ())
    }

    fn run_unit_command(
        &self,
        command: UnitCommand,
        unit: &str,
    ) -> Result<ExecResult, ServiceError> {
        self.systemctl(&[command.as_str(), unit])
    }
}
