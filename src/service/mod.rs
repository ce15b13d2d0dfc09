//! Service manager seam used by reconciliation.
//!
//! [`ServiceControl`] is the whole contract the reconciler relies on; the
//! production implementation ([`systemd::SystemdServiceControl`]) shells out
//! to `systemctl` and masks units on disk.
pub mod systemd;

use std::fmt;
use std::path::Path;

use crate::error::ServiceError;
use crate::exec::ExecResult;

/// Unit of the reboot manager daemon.
pub const LOCKSMITH_UNIT: &str = "locksmithd.service";

/// Lifecycle command issued against a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCommand {
    /// Start the unit.
    Start,
    /// Stop the unit.
    Stop,
    /// Stop and start the unit, starting it if it was not running.
    Restart,
}

impl UnitCommand {
    /// The `systemctl` verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
        }
    }
}

impl fmt::Display for UnitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations the reconciler needs from the service manager.
///
/// Every call is synchronous and either completes or returns a terminal
/// error; callers do not retry.
pub trait ServiceControl {
    /// Prevent `unit` from being started, even indirectly, under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mask cannot be put in place.
    fn mask_unit(&self, unit: &str, root: &Path) -> Result<(), ServiceError>;

    /// Reload unit definitions.
    ///
    /// # Errors
    ///
    /// Returns an error if the service manager rejects or cannot run the reload.
    fn daemon_reload(&self) -> Result<(), ServiceError>;

    /// Issue `command` against `unit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be run or fails.
    fn run_unit_command(
        &self,
        command: UnitCommand,
        unit: &str,
    ) -> Result<ExecResult, ServiceError>;
}
