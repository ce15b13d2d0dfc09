//! Read-only view of the reboot strategy currently in effect.
use std::io::{self, BufReader};
use std::path::PathBuf;

use serde::Serialize;

use super::document::ConfigDocument;
use super::merge::open_source;
use super::paths::FilePaths;
use crate::error::MergeError;

/// Which file supplied the effective configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// `etc/coreos/update.conf`.
    Primary,
    /// The packaged default in `usr/share/coreos`.
    Fallback,
}

/// The configuration a merge would start from, and its strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    /// Which candidate file was read.
    pub source: ConfigSource,
    /// Path of that file.
    pub path: PathBuf,
    /// Value of `REBOOT_STRATEGY`, if assigned.
    pub strategy: Option<String>,
}

/// Read the effective configuration using the same precedence as a merge.
///
/// Returns `Ok(None)` when neither the primary file nor the fallback exists.
///
/// # Errors
///
/// Returns an error if a file exists but cannot be opened or read.
pub fn read_effective(paths: &FilePaths) -> Result<Option<EffectiveConfig>, MergeError> {
    let (path, file) = match open_source(paths) {
        Ok(opened) => opened,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    let source = if path == paths.primary.as_path() {
        ConfigSource::Primary
    } else {
        ConfigSource::Fallback
    };
    let document =
        ConfigDocument::read_from(BufReader::new(file)).map_err(|source| MergeError::Scan {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(EffectiveConfig {
        source,
        path: path.to_path_buf(),
        strategy: document.strategy(),
    }))
}
