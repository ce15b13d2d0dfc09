//! Domain-specific error types for reboot strategy reconciliation.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Core modules return typed errors (e.g., [`MergeError`], [`ReconcileError`])
//! while command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! LocksmithError
//! ├── Strategy(StrategyError)    decoding the requested strategy
//! └── Reconcile(ReconcileError)  the step that failed
//!     ├── Merge(MergeError)      update.conf rewrite
//!     ├── Mask { .. }           ┐
//!     ├── DaemonReload(..)      ├ ServiceError
//!     └── UnitCommand { .. }    ┘
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::service::UnitCommand;

/// Top-level error type for a reconciliation request.
///
/// Convertible to [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum LocksmithError {
    /// The strategy string could not be decoded.
    #[error("invalid reboot strategy: {0}")]
    Strategy(#[from] StrategyError),

    /// A reconciliation step failed.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

/// Errors that arise when decoding a strategy string.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StrategyError {
    /// The strategy string is empty.
    #[error("strategy must not be empty")]
    Empty,

    /// The strategy contains a line break, which would split the config line.
    #[error("strategy {0:?} contains a line break")]
    LineBreak(String),
}

/// Errors that arise while rewriting `update.conf`.
///
/// Each variant names the step that failed and the path it operated on.
#[derive(Error, Debug)]
pub enum MergeError {
    /// The destination directory could not be created.
    #[error("failed to create directory {}: {source}", dir.display())]
    CreateDir {
        /// Directory that could not be created.
        dir: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The temporary file could not be created next to the destination.
    #[error("failed to create temporary file in {}: {source}", dir.display())]
    CreateTemp {
        /// Directory in which the temporary file was requested.
        dir: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The temporary file mode could not be set.
    #[error("failed to set mode on {}: {source}", path.display())]
    Chmod {
        /// Path of the temporary file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Neither the primary nor the fallback source could be opened, or the
    /// primary failed with something other than "not found".
    #[error("failed to open {}: {source}", path.display())]
    OpenSource {
        /// Path of the source that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Reading the source document failed mid-scan.
    #[error("failed to read {}: {source}", path.display())]
    Scan {
        /// Path of the source being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Writing the merged document to the temporary file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Path of the temporary file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The temporary file could not be renamed onto the destination.
    #[error("failed to replace {}: {source}", to.display())]
    Rename {
        /// Temporary file path.
        from: PathBuf,
        /// Destination path.
        to: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl MergeError {
    /// The I/O error kind behind this failure.
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::CreateDir { source, .. }
            | Self::CreateTemp { source, .. }
            | Self::Chmod { source, .. }
            | Self::OpenSource { source, .. }
            | Self::Scan { source, .. }
            | Self::Write { source, .. }
            | Self::Rename { source, .. } => source.kind(),
        }
    }
}

/// Errors reported by a [`ServiceControl`](crate::service::ServiceControl)
/// implementation.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The service manager command could not be started.
    #[error("failed to execute {program}")]
    Spawn {
        /// Program that could not be executed.
        program: String,
        /// Underlying error from the executor.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The service manager command exited non-zero.
    #[error("command '{program}' failed (exit {exit_code}): {stderr}")]
    ExecutionFailed {
        /// Program that was invoked.
        program: String,
        /// Exit code, or `-1` when terminated by a signal.
        exit_code: i32,
        /// Captured standard error output.
        stderr: String,
    },

    /// A filesystem operation on a unit path failed.
    #[error("failed to update {}: {source}", path.display())]
    Io {
        /// Path that could not be updated.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Errors that arise during reconciliation, one variant per step.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Writing the strategy to `update.conf` failed.
    #[error("failed to write reboot strategy: {0}")]
    Merge(#[from] MergeError),

    /// Masking the managed unit failed.
    #[error("failed to mask {unit}: {source}")]
    Mask {
        /// Unit that could not be masked.
        unit: String,
        /// Underlying service error.
        source: ServiceError,
    },

    /// Reloading unit definitions failed.
    #[error("failed to reload unit definitions: {0}")]
    DaemonReload(#[source] ServiceError),

    /// A lifecycle command against the managed unit failed.
    #[error("failed to {command} {unit}: {source}")]
    UnitCommand {
        /// Command that was issued.
        command: UnitCommand,
        /// Unit the command targeted.
        unit: String,
        /// Underlying service error.
        source: ServiceError,
    },
}
