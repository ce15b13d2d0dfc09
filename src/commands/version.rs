//! Command: print version information.
use std::io::Write;

use anyhow::Result;

use super::VERSION;

/// Print the version to `out`.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn run(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "locksmith-strategy {VERSION}")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn prints_name_and_version() {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("locksmith-strategy {VERSION}\n"));
        assert!(!VERSION.is_empty());
    }
}
