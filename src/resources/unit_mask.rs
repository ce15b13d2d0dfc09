//! A masked systemd unit as a resource.
use std::path::PathBuf;

use anyhow::Result;

use super::{Resource, ResourceState};
use crate::service::systemd::{is_masked, masked_unit_path};

/// Desired state: `unit` masked under `root`.
#[derive(Debug, Clone)]
pub struct UnitMaskResource {
    unit: String,
    root: PathBuf,
}

impl UnitMaskResource {
    /// Create a mask resource for `unit` under `root`.
    #[must_use]
    pub const fn new(unit: String, root: PathBuf) -> Self {
        Self { unit, root }
    }
}

impl Resource for UnitMaskResource {
    fn description(&self) -> String {
        masked_unit_path(&self.unit, &self.root).display().to_string()
    }

    fn current_state(&self) -> Result<ResourceState> {
        if is_masked(&self.unit, &self.root) {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }
}
