//! Atomic rewrite of `update.conf` with a new reboot strategy.
use std::fs::{self, File, Permissions};
use std::io::{self, BufReader, BufWriter, Write as _};
use std::os::unix::fs::{DirBuilderExt as _, PermissionsExt as _};
use std::path::Path;

use super::document::ConfigDocument;
use super::paths::FilePaths;
use crate::error::MergeError;

/// Mode of the written `update.conf`.
pub const CONFIG_MODE: u32 = 0o644;

/// Mode of directories created on the way to `update.conf`.
pub const DIR_MODE: u32 = 0o755;

/// Set `REBOOT_STRATEGY=<strategy>` in `root/etc/coreos/update.conf`.
///
/// The existing file is used as the starting point; when it does not exist
/// the packaged default in `root/usr/share/coreos` is used instead.  Every
/// other line is preserved in order.  The result is written to a temporary
/// file in the destination directory and renamed over the destination, so
/// readers only ever see the old or the new content.
///
/// # Errors
///
/// Returns a [`MergeError`] naming the failed step: directory creation,
/// temporary file creation or chmod, opening the source (only "not found" on
/// the primary file falls back), reading, writing, or the final rename.
pub fn merge_strategy(strategy: &str, root: &Path) -> Result<(), MergeError> {
    merge_into(&FilePaths::new(root), strategy)
}

/// [`merge_strategy`] against precomputed paths.
///
/// # Errors
///
/// See [`merge_strategy`].
pub fn merge_into(paths: &FilePaths, strategy: &str) -> Result<(), MergeError> {
    fs::DirBuilder::new()
        .recursive(true)
        .mode(DIR_MODE)
        .create(&paths.dir)
        .map_err(|source| MergeError::CreateDir {
            dir: paths.dir.clone(),
            source,
        })?;

    // Must live next to the destination so the rename stays on one filesystem.
    let mut tmp = tempfile::Builder::new()
        .prefix(".update.conf")
        .tempfile_in(&paths.dir)
        .map_err(|source| MergeError::CreateTemp {
            dir: paths.dir.clone(),
            source,
        })?;
    tmp.as_file()
        .set_permissions(Permissions::from_mode(CONFIG_MODE))
        .map_err(|source| MergeError::Chmod {
            path: tmp.path().to_path_buf(),
            source,
        })?;

    let (source_path, source) = open_source(paths)?;
    let mut document =
        ConfigDocument::read_from(BufReader::new(source)).map_err(|source| MergeError::Scan {
            path: source_path.to_path_buf(),
            source,
        })?;
    document.set_strategy(strategy);

    let write_result = {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        document
            .write_to(&mut writer)
            .and_then(|()| writer.flush())
    };
    write_result
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|source| MergeError::Write {
            path: tmp.path().to_path_buf(),
            source,
        })?;

    let destination = paths.destination();
    tmp.persist(destination).map_err(|e| MergeError::Rename {
        from: e.file.path().to_path_buf(),
        to: destination.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

/// Open the primary file, or the fallback template when the primary does
/// not exist.
///
/// # Errors
///
/// Returns [`MergeError::OpenSource`] for any primary error other than
/// "not found", or for any fallback error.
pub fn open_source(paths: &FilePaths) -> Result<(&Path, File), MergeError> {
    match File::open(&paths.primary) {
        Ok(file) => Ok((&paths.primary, file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => File::open(&paths.fallback)
            .map(|file| (paths.fallback.as_path(), file))
            .map_err(|source| MergeError::OpenSource {
                path: paths.fallback.clone(),
                source,
            }),
        Err(source) => Err(MergeError::OpenSource {
            path: paths.primary.clone(),
            source,
        }),
    }
}
