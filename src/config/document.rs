//! Line-oriented view of `update.conf`.
use std::fmt;
use std::io::{self, BufRead, Write};

/// Key managed in `update.conf`.
pub const STRATEGY_KEY: &str = "REBOOT_STRATEGY";

/// Prefix that marks the managed line. Lines such as `REBOOT_STRATEGY_X=`
/// or ` REBOOT_STRATEGY=` do not match.
const STRATEGY_PREFIX: &[u8] = b"REBOOT_STRATEGY=";

/// An ordered sequence of raw lines from a `key=value` file.
///
/// Lines are kept as bytes so that everything except the managed key passes
/// through unchanged, whatever its encoding.  Line terminators are not
/// stored; [`write_to`](Self::write_to) ends every line with `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    lines: Vec<Vec<u8>>,
}

impl ConfigDocument {
    /// Read all lines from `reader`, splitting on `\n` and dropping a
    /// trailing `\r`.
    ///
    /// # Errors
    ///
    /// Returns the first read error encountered.
    pub fn read_from<R: BufRead>(reader: R) -> io::Result<Self> {
        let lines = reader
            .split(b'\n')
            .map(|line| {
                line.map(|mut bytes| {
                    if bytes.last() == Some(&b'\r') {
                        bytes.pop();
                    }
                    bytes
                })
            })
            .collect::<io::Result<_>>()?;
        Ok(Self { lines })
    }

    /// Set the managed key to `strategy`.
    ///
    /// The first matching line is replaced in place and any later matches are
    /// dropped; when no line matches, one is appended.  Returns `true` when an
    /// existing line was replaced.
    pub fn set_strategy(&mut self, strategy: &str) -> bool {
        let replacement = strategy_line(strategy);
        let mut seen = false;
        self.lines.retain_mut(|line| {
            if !line.starts_with(STRATEGY_PREFIX) {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            line.clone_from(&replacement);
            true
        });
        if !seen {
            self.lines.push(replacement);
        }
        seen
    }

    /// Value of the managed key. With several assignments the last one wins,
    /// as it does for an environment file.
    #[must_use]
    pub fn strategy(&self) -> Option<String> {
        self.lines
            .iter()
            .rev()
            .find_map(|line| line.strip_prefix(STRATEGY_PREFIX))
            .map(|value| String::from_utf8_lossy(value).into_owned())
    }

    /// Write every line followed by `\n`.
    ///
    /// # Errors
    ///
    /// Returns the first write error encountered.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for line in &self.lines {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", String::from_utf8_lossy(line))?;
        }
        Ok(())
    }
}

fn strategy_line(strategy: &str) -> Vec<u8> {
    let mut line = STRATEGY_PREFIX.to_vec();
    line.extend_from_slice(strategy.as_bytes());
    line
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn doc(content: &str) -> ConfigDocument {
        ConfigDocument::read_from(content.as_bytes()).unwrap()
    }

    fn render(document: &ConfigDocument) -> String {
        let mut out = Vec::new();
        document.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    // ------------------------------------------------------------------
    // read_from
    // ------------------------------------------------------------------

    #[test]
    fn read_splits_lines() {
        assert_eq!(
            doc("GROUP=stable\nSERVER=x\n").lines,
            vec![b"GROUP=stable".to_vec(), b"SERVER=x".to_vec()]
        );
    }

    #[test]
    fn read_keeps_last_line_without_newline() {
        let document = doc("GROUP=stable\nSERVER=x");
        assert_eq!(render(&document), "GROUP=stable\nSERVER=x\n");
    }

    #[test]
    fn read_strips_carriage_returns() {
        let document = doc("GROUP=stable\r\nREBOOT_STRATEGY=off\r\n");
        assert_eq!(render(&document), "GROUP=stable\nREBOOT_STRATEGY=off\n");
    }

    #[test]
    fn read_empty_input() {
        assert_eq!(doc(""), ConfigDocument::default());
        assert_eq!(render(&doc("")), "");
    }

    #[test]
    fn read_preserves_blank_lines_and_comments() {
        let content = "# managed by hand\n\nGROUP=beta\n";
        assert_eq!(render(&doc(content)), content);
    }

    #[test]
    fn read_passes_non_utf8_bytes_through() {
        let raw: &[u8] = b"COMMENT=\xff\xfe\n";
        let mut document = ConfigDocument::read_from(raw).unwrap();
        document.set_strategy("reboot");
        let mut out = Vec::new();
        document.write_to(&mut out).unwrap();
        assert_eq!(out, b"COMMENT=\xff\xfe\nREBOOT_STRATEGY=reboot\n");
    }

    // ------------------------------------------------------------------
    // set_strategy
    // ------------------------------------------------------------------

    #[test]
    fn set_strategy_replaces_existing_line_in_place() {
        let mut document = doc("GROUP=stable\nREBOOT_STRATEGY=off\nSERVER=x\n");
        assert!(document.set_strategy("etcd-lock"));
        insta::assert_snapshot!(document.to_string(), @r"
        GROUP=stable
        REBOOT_STRATEGY=etcd-lock
        SERVER=x
        ");
    }

    #[test]
    fn set_strategy_appends_when_missing() {
        let mut document = doc("GROUP=stable\nSERVER=x\n");
        assert!(!document.set_strategy("best-effort"));
        assert_eq!(
            render(&document),
            "GROUP=stable\nSERVER=x\nREBOOT_STRATEGY=best-effort\n"
        );
    }

    #[test]
    fn set_strategy_on_empty_document() {
        let mut document = ConfigDocument::default();
        document.set_strategy("reboot");
        assert_eq!(render(&document), "REBOOT_STRATEGY=reboot\n");
    }

    #[test]
    fn set_strategy_collapses_duplicates_at_first_position() {
        let mut document =
            doc("REBOOT_STRATEGY=off\nGROUP=stable\nREBOOT_STRATEGY=reboot\nSERVER=x\n");
        document.set_strategy("etcd-lock");
        assert_eq!(
            render(&document),
            "REBOOT_STRATEGY=etcd-lock\nGROUP=stable\nSERVER=x\n"
        );
    }

    #[test]
    fn set_strategy_ignores_similar_keys() {
        let mut document = doc("REBOOT_STRATEGY_OLD=off\n REBOOT_STRATEGY=off\n");
        assert!(!document.set_strategy("reboot"));
        assert_eq!(
            render(&document),
            "REBOOT_STRATEGY_OLD=off\n REBOOT_STRATEGY=off\nREBOOT_STRATEGY=reboot\n"
        );
    }

    #[test]
    fn set_strategy_twice_is_stable() {
        let mut document = doc("GROUP=stable\n");
        document.set_strategy("etcd-lock");
        let once = render(&document);
        document.set_strategy("etcd-lock");
        assert_eq!(render(&document), once);
    }

    #[test]
    fn set_strategy_replaces_empty_value() {
        let mut document = doc("REBOOT_STRATEGY=\n");
        assert!(document.set_strategy("off"));
        assert_eq!(render(&document), "REBOOT_STRATEGY=off\n");
    }

    // ------------------------------------------------------------------
    // strategy
    // ------------------------------------------------------------------

    #[test]
    fn strategy_reads_value() {
        assert_eq!(
            doc("GROUP=stable\nREBOOT_STRATEGY=best-effort\n").strategy(),
            Some("best-effort".to_string())
        );
    }

    #[test]
    fn strategy_last_assignment_wins() {
        assert_eq!(
            doc("REBOOT_STRATEGY=off\nREBOOT_STRATEGY=reboot\n").strategy(),
            Some("reboot".to_string())
        );
    }

    #[test]
    fn strategy_absent() {
        assert_eq!(doc("GROUP=stable\n").strategy(), None);
    }
}
