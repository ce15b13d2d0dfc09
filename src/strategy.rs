//! Decoding of the requested reboot strategy.
use std::fmt;
use std::str::FromStr;

use crate::error::StrategyError;
use crate::service::UnitCommand;

/// Strategy value that disables locksmithd instead of configuring it.
pub const DISABLE_STRATEGY: &str = "off";

/// What a strategy string asks for, decoded once at the entry point.
///
/// # Examples
///
/// ```
/// use locksmith_strategy::strategy::StrategyRequest;
///
/// let off: StrategyRequest = "off".parse().unwrap();
/// assert_eq!(off, StrategyRequest::Disable);
///
/// let lock: StrategyRequest = "etcd-lock".parse().unwrap();
/// assert_eq!(lock, StrategyRequest::Apply("etcd-lock".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyRequest {
    /// Mask and stop the reboot manager.
    Disable,
    /// Write the strategy to `update.conf` and restart the reboot manager.
    Apply(String),
}

/// One externally visible step of a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Mask the managed unit.
    MaskUnit,
    /// Rewrite `update.conf`.
    WriteConfig,
    /// Reload unit definitions.
    DaemonReload,
    /// Issue a lifecycle command against the managed unit.
    RunUnit(UnitCommand),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaskUnit => f.write_str("mask unit"),
            Self::WriteConfig => f.write_str("write update.conf"),
            Self::DaemonReload => f.write_str("reload unit definitions"),
            Self::RunUnit(command) => write!(f, "{command} unit"),
        }
    }
}

const DISABLE_PLAN: &[Step] = &[
    Step::MaskUnit,
    Step::DaemonReload,
    Step::RunUnit(UnitCommand::Stop),
];

const APPLY_PLAN: &[Step] = &[
    Step::WriteConfig,
    Step::DaemonReload,
    Step::RunUnit(UnitCommand::Restart),
];

impl StrategyRequest {
    /// Steps taken for this request, in order.
    #[must_use]
    pub const fn plan(&self) -> &'static [Step] {
        match self {
            Self::Disable => DISABLE_PLAN,
            Self::Apply(_) => APPLY_PLAN,
        }
    }

    /// The value written to `update.conf`, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Disable => None,
            Self::Apply(value) => Some(value),
        }
    }
}

impl FromStr for StrategyRequest {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(StrategyError::Empty);
        }
        if s.contains(['\n', '\r']) {
            return Err(StrategyError::LineBreak(s.to_string()));
        }
        if s == DISABLE_STRATEGY {
            Ok(Self::Disable)
        } else {
            Ok(Self::Apply(s.to_string()))
        }
    }
}

impl fmt::Display for StrategyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disable => f.write_str(DISABLE_STRATEGY),
            Self::Apply(value) => f.write_str(value),
        }
    }
}
