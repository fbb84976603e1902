//! Shared helpers for tests that need declaration files on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Temporary directory tree removed when dropped.
///
/// Helpers panic on I/O failure because they only run inside tests.
///
/// ```
/// use test_support::TempTree;
///
/// let tree = TempTree::new();
/// tree.write("a/OWNERS", "a.go @a");
/// assert!(tree.path().join("a/OWNERS").is_file());
/// ```
#[derive(Debug)]
pub struct TempTree {
    dir: TempDir,
}

impl TempTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temporary tree"),
        }
    }

    /// Returns the root of the tree.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Resolves `relative` against the tree root.
    #[must_use]
    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Creates `relative` and any missing parent directories.
    pub fn mkdir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.join(relative)).expect("create directory");
        self
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) -> &Self {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        fs::write(&path, contents).expect("write file");
        self
    }

    /// Runs `git` with `args` inside the tree.
    ///
    /// A fixed identity is supplied and commit signing is disabled so commits
    /// succeed regardless of the user's configuration.
    pub fn git(&self, args: &[&str]) -> &Self {
        let output = Command::new("git")
            .args([
                "-c",
                "user.name=codenotify tests",
                "-c",
                "user.email=tests@codenotify.invalid",
                "-c",
                "commit.gpgsign=false",
                "-c",
                "init.defaultBranch=main",
            ])
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("run git");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        self
    }
}

impl Default for TempTree {
    fn default() -> Self {
        Self::new()
    }
}
