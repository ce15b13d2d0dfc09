//! Locations of `update.conf` relative to a root prefix.
use std::path::{Path, PathBuf};

/// Source and destination paths for `update.conf`, derived from a root prefix.
///
/// The root is usually `/`, but may point at a mounted filesystem so that an
/// image can be configured before first boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePaths {
    /// `R/etc/coreos`, the directory that holds the destination.
    pub dir: PathBuf,
    /// `R/etc/coreos/update.conf`, read first and always written.
    pub primary: PathBuf,
    /// `R/usr/share/coreos/update.conf`, the packaged default template.
    pub fallback: PathBuf,
}

impl FilePaths {
    /// Derive all paths from `root`. An empty root means the live system.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        let root = effective_root(root);
        let dir = root.join("etc").join("coreos");
        Self {
            primary: dir.join("update.conf"),
            fallback: root.join("usr").join("share").join("coreos").join("update.conf"),
            dir,
        }
    }

    /// The file a merge replaces.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.primary
    }
}

/// Treat an empty root prefix as `/`.
#[must_use]
pub fn effective_root(root: &Path) -> &Path {
    if root.as_os_str().is_empty() {
        Path::new("/")
    } else {
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_root_paths() {
        let paths = FilePaths::new(Path::new("/"));
        assert_eq!(paths.dir, PathBuf::from("/etc/coreos"));
        assert_eq!(paths.primary, PathBuf::from("/etc/coreos/update.conf"));
        assert_eq!(
            paths.fallback,
            PathBuf::from("/usr/share/coreos/update.conf")
        );
    }

    #[test]
    fn empty_root_is_live_root() {
        assert_eq!(FilePaths::new(Path::new("")), FilePaths::new(Path::new("/")));
    }

    #[test]
    fn alternate_root_prefixes_every_path() {
        let paths = FilePaths::new(Path::new("/mnt/sysroot"));
        assert_eq!(
            paths.primary,
            PathBuf::from("/mnt/sysroot/etc/coreos/update.conf")
        );
        assert_eq!(
            paths.fallback,
            PathBuf::from("/mnt/sysroot/usr/share/coreos/update.conf")
        );
    }

    #[test]
    fn destination_is_primary() {
        let paths = FilePaths::new(Path::new("/mnt"));
        assert_eq!(paths.destination(), paths.primary.as_path());
        assert_eq!(paths.destination().parent(), Some(paths.dir.as_path()));
    }
}
