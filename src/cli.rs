//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "locksmith-strategy",
    about = "Set the locksmithd reboot strategy and reconcile the service",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Filesystem root that update.conf and unit masks are resolved under
    #[arg(long, global = true, default_value = "/")]
    pub root: PathBuf,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the reboot strategy and reconcile locksmithd ("off" disables it)
    Apply(ApplyOpts),
    /// Show the strategy in effect and whether locksmithd is masked
    Status(StatusOpts),
    /// Print version information
    Version,
}

/// Options for the `apply` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ApplyOpts {
    /// Reboot strategy (e.g. best-effort, etcd-lock, reboot, off)
    pub strategy: String,
}

/// Options for the `status` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct StatusOpts {
    /// Emit a JSON object instead of text
    #[arg(long)]
    pub json: bool,
}
