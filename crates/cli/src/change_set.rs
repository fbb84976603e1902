//! Sources of the paths whose owners are resolved.

use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

/// Error raised when a change set cannot be produced.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The diff program could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying spawn failure.
        #[source]
        source: io::Error,
    },
    /// The diff program ran but reported failure.
    #[error("error executing '{command}' ({status})\n{stderr}")]
    Failed {
        /// Command line that was executed.
        command: String,
        /// Exit status reported by the process.
        status: ExitStatus,
        /// Captured standard error.
        stderr: String,
    },
}

/// Yields the tree-relative paths of changed files.
///
/// Each path is resolved independently, so the order only affects the order
/// of the output.
pub trait ChangeSet {
    /// Returns the changed paths.
    fn changed_paths(&self) -> Result<Vec<String>, DiffError>;
}

/// Paths supplied directly by the caller.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExplicitPaths {
    paths: Vec<String>,
}

impl ExplicitPaths {
    /// Wraps `paths`.
    pub fn new(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl ChangeSet for ExplicitPaths {
    fn changed_paths(&self) -> Result<Vec<String>, DiffError> {
        Ok(self.paths.clone())
    }
}

/// Files changed between a revision and `HEAD`, as reported by
/// `git diff <ref>.. --name-only`.
///
/// Paths are requested NUL-terminated so git never quotes them, and relative
/// to `root` so a root below the repository top level sees its own files
/// only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GitDiff {
    root: PathBuf,
    from_ref: String,
}

impl GitDiff {
    const PROGRAM: &'static str = "git";

    /// Diffs the checkout at `root` against `from_ref`.
    pub fn new(root: impl Into<PathBuf>, from_ref: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            from_ref: from_ref.into(),
        }
    }

    /// Arguments passed to `git`.
    #[must_use]
    pub fn arguments(&self) -> [String; 5] {
        [
            "diff".to_owned(),
            format!("{}..", self.from_ref),
            "--name-only".to_owned(),
            "--relative".to_owned(),
            "-z".to_owned(),
        ]
    }

    fn describe(&self) -> String {
        let mut text = Self::PROGRAM.to_owned();
        for argument in self.arguments() {
            text.push(' ');
            text.push_str(&argument);
        }
        text
    }
}

impl ChangeSet for GitDiff {
    fn changed_paths(&self) -> Result<Vec<String>, DiffError> {
        tracing::debug!(target: "cli::diff", command = %self.describe(), root = %self.root.display(), "running diff");

        let output = Command::new(Self::PROGRAM)
            .args(self.arguments())
            .current_dir(&self.root)
            .output()
            .map_err(|source| DiffError::Spawn {
                program: Self::PROGRAM.to_owned(),
                source,
            })?;

        if !output.status.success() {
            return Err(DiffError::Failed {
                command: self.describe(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_owned(),
            });
        }

        Ok(parse_name_only(&output.stdout))
    }
}

/// Splits NUL-terminated `--name-only -z` output into paths.
fn parse_name_only(stdout: &[u8]) -> Vec<String> {
    stdout
        .split(|&byte| byte == 0)
        .filter(|name| !name.is_empty())
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect()
}
