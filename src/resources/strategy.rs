//! The `REBOOT_STRATEGY` key in `update.conf` as a resource.
use anyhow::{Context as _, Result};

use super::{Resource, ResourceState};
use crate::config::{FilePaths, STRATEGY_KEY, read_effective};

/// Desired value of `REBOOT_STRATEGY` under a root.
#[derive(Debug, Clone)]
pub struct StrategyResource {
    paths: FilePaths,
    value: String,
}

impl StrategyResource {
    /// Create a resource for `value` against `paths`.
    #[must_use]
    pub const fn new(paths: FilePaths, value: String) -> Self {
        Self { paths, value }
    }
}

impl Resource for StrategyResource {
    fn description(&self) -> String {
        format!(
            "{STRATEGY_KEY}={} in {}",
            self.value,
            self.paths.destination().display()
        )
    }

    /// Compared against the file a merge would start from, so a strategy
    /// present only in the packaged default counts as current.
    fn current_state(&self) -> Result<ResourceState> {
        let effective = read_effective(&self.paths)
            .with_context(|| format!("reading {}", self.paths.primary.display()))?;
        Ok(match effective.and_then(|config| config.strategy) {
            None => ResourceState::Missing,
            Some(current) if current == self.value => ResourceState::Correct,
            Some(current) => ResourceState::Incorrect { current },
        })
    }
}
