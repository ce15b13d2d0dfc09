//! Build script: embeds the release version into the binary.

use std::process::Command;

fn main() {
    // Prefer LOCKSMITH_STRATEGY_VERSION if set by the release workflow,
    // otherwise fall back to git describe for local builds.
    if let Ok(version) = std::env::var("LOCKSMITH_STRATEGY_VERSION") {
        println!("cargo:rustc-env=LOCKSMITH_STRATEGY_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=LOCKSMITH_STRATEGY_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=LOCKSMITH_STRATEGY_VERSION");
}
