//! Command: report the strategy in effect and the unit mask.
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::{GlobalOpts, StatusOpts};
use crate::config::paths::effective_root;
use crate::config::{ConfigSource, EffectiveConfig, FilePaths, read_effective};
use crate::logging::Logger;
use crate::service::LOCKSMITH_UNIT;
use crate::service::systemd::is_masked;

/// Snapshot of the reboot configuration under a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Root the paths were resolved under.
    pub root: PathBuf,
    /// Managed unit name.
    pub unit: String,
    /// Whether the managed unit is masked.
    pub masked: bool,
    /// Effective configuration, or `None` when no `update.conf` exists.
    pub config: Option<EffectiveConfig>,
}

impl StatusReport {
    /// Collect the report for `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing `update.conf` cannot be read.
    pub fn collect(root: &Path) -> Result<Self> {
        let root = effective_root(root);
        let paths = FilePaths::new(root);
        let config = read_effective(&paths)
            .with_context(|| format!("reading {}", paths.primary.display()))?;
        Ok(Self {
            root: root.to_path_buf(),
            unit: LOCKSMITH_UNIT.to_string(),
            masked: is_masked(LOCKSMITH_UNIT, root),
            config,
        })
    }

    /// Write the report as aligned `key: value` lines.
    ///
    /// # Errors
    ///
    /// Returns an error if `out` cannot be written.
    pub fn write_text(&self, out: &mut dyn Write) -> Result<()> {
        match &self.config {
            Some(config) => {
                let strategy = config.strategy.as_deref().unwrap_or("(unset)");
                let source = match config.source {
                    ConfigSource::Primary => "primary",
                    ConfigSource::Fallback => "default",
                };
                writeln!(out, "strategy: {strategy}")?;
                writeln!(out, "source:   {} ({source})", config.path.display())?;
            }
            None => writeln!(out, "strategy: (no update.conf found)")?,
        }
        let mask = if self.masked { "masked" } else { "not masked" };
        writeln!(out, "unit:     {} ({mask})", self.unit)?;
        Ok(())
    }
}

/// Run the status command, writing the report to `out`.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or `out` cannot be
/// written.
pub fn run(
    global: &GlobalOpts,
    opts: &StatusOpts,
    log: &Logger,
    out: &mut dyn Write,
) -> Result<()> {
    log.debug(&format!("root: {}", global.root.display()));
    let report = StatusReport::collect(&global.root)?;
    if opts.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        report.write_text(out)?;
    }
    Ok(())
}
