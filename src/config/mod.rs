//! `update.conf` handling: paths, line-level merge, and atomic replace.
//!
//! The file is a plain `KEY=value` list read by locksmithd.  Only the
//! `REBOOT_STRATEGY` line is interpreted; every other line is carried through
//! a merge untouched.
pub mod document;
pub mod effective;
pub mod merge;
pub mod paths;

pub use document::{ConfigDocument, STRATEGY_KEY};
pub use effective::{ConfigSource, EffectiveConfig, read_effective};
pub use merge::{merge_into, merge_strategy};
pub use paths::FilePaths;
