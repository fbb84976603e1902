use std::io;
use std::path::PathBuf;

/// Reason a declaration file could not be parsed.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ParseErrorKind {
    /// A line starting with `[` or `^` is not a valid section header.
    #[error("unrecognized section header '{0}'")]
    UnrecognizedHeader(String),
    /// The section header's approval count is not a positive integer.
    #[error("invalid approval count '{0}'")]
    InvalidApprovals(String),
    /// The rule's pattern names the declaring directory itself.
    #[error("rule pattern '{0}' does not name any path")]
    EmptyPattern(String),
    /// The rule's pattern is not a valid glob.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern text as written in the file.
        pattern: String,
        /// Glob compilation failure.
        #[source]
        source: globset::Error,
    },
    /// The file is not valid UTF-8.
    #[error("declaration is not valid UTF-8")]
    InvalidUtf8,
}

/// Parse failure located at a 1-based line of a declaration file.
#[derive(Clone, Debug, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    line: usize,
    #[source]
    kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) const fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }

    /// Returns the 1-based line number of the offending line.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns what went wrong.
    #[must_use]
    pub const fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

/// Error returned when resolving ownership or loading a declaration.
#[derive(Debug, thiserror::Error)]
pub enum OwnersError {
    /// A declaration file exists but cannot be parsed.
    #[error("malformed declaration '{}': {source}", path.display())]
    Malformed {
        /// Declaration file that failed to parse.
        path: PathBuf,
        /// Parse failure with line information.
        #[source]
        source: ParseError,
    },
    /// The storage reader failed for a reason other than a missing file.
    #[error("failed to read declaration '{}': {source}", path.display())]
    Read {
        /// Declaration file that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl OwnersError {
    /// Returns the declaration file the error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Malformed { path, .. } | Self::Read { path, .. } => path,
        }
    }

    /// Returns the parse failure when the declaration is malformed.
    #[must_use]
    pub const fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Malformed { source, .. } => Some(source),
            Self::Read { .. } => None,
        }
    }
}
