//! Read-only resource checks (the "check" half of check + apply).
//!
//! Reconciliation always runs every step, so these never gate the real
//! apply path; they feed `status` and `apply --dry-run`.
pub mod strategy;
pub mod unit_mask;

use anyhow::Result;

pub use strategy::StrategyResource;
pub use unit_mask::UnitMaskResource;

/// State of a resource (config key, unit mask).
///
/// # Examples
///
/// ```
/// use locksmith_strategy::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let wrong = ResourceState::Incorrect { current: "reboot".into() };
///
/// assert_ne!(missing, correct);
/// assert_ne!(wrong, correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist or is not present.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// The current value of the resource.
        current: String,
    },
}

impl ResourceState {
    /// Short label for console output.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Missing => "missing".to_string(),
            Self::Correct => "up to date".to_string(),
            Self::Incorrect { current } => format!("currently {current}"),
        }
    }
}

/// A resource whose state can be inspected without changing it.
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined due to I/O failures
    /// or permission issues.
    fn current_state(&self) -> Result<ResourceState>;

    /// Determine if applying would change the resource.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`current_state`](Self::current_state).
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(
            self.current_state()?,
            ResourceState::Missing | ResourceState::Incorrect { .. }
        ))
    }
}
