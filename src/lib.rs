//! Reboot strategy reconciliation for locksmithd.
//!
//! Writes `REBOOT_STRATEGY` into `/etc/coreos/update.conf` (starting from the
//! packaged default when the file does not exist yet) and brings
//! `locksmithd.service` in line with it: the strategy `off` masks and stops
//! the unit, any other value is written and the unit restarted.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: `update.conf` paths, line-level merge, atomic replace
//! - **[`strategy`]** and **[`reconcile`]**: decoding a request and running
//!   its steps against a [`service::ServiceControl`]
//! - **[`service`]**: the service manager seam and its `systemctl` backend
//! - **[`resources`]**: read-only state checks for `status` and dry runs
//! - **[`commands`]**: subcommand orchestration (`apply`, `status`, `version`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod reconcile;
pub mod resources;
pub mod service;
pub mod strategy;

pub use error::LocksmithError;
pub use reconcile::reconcile_strategy;
