//! Top-level subcommand orchestration.
//!
//! Commands are the only layer that logs; they translate typed errors from
//! the core into [`anyhow::Error`] with context.
pub mod apply;
pub mod status;
pub mod version;

/// Version string embedded by the build script, or the crate version.
pub const VERSION: &str = match option_env!("LOCKSMITH_STRATEGY_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};
