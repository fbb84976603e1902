//! Canonical spelling of repository-relative paths.
//!
//! Query paths and declared patterns pass through [`normalize`] before they
//! are compared, so `/root.go`, `./root.go`, `.//./root.go` and `root.go` all
//! name the same file. Paths always use `/` as the separator regardless of
//! the host platform; they identify entries in the tree rather than files on
//! the local disk.

const PARENT: &str = "..";

/// Returns the canonical form of `path`.
///
/// Empty and `.` segments are dropped, runs of separators collapse to one,
/// and `..` folds onto the preceding ordinary segment. A leading separator is
/// discarded because every path is relative to the tree root. Paths that name
/// the root itself (`""`, `.`, `/`, `./`) normalize to the empty string.
///
/// # Examples
///
/// ```
/// use owners::path::normalize;
///
/// assert_eq!(normalize(".//./root_slash.go"), "root_slash.go");
/// assert_eq!(normalize("/a//b/../c.go"), "a/c.go");
/// assert_eq!(normalize("."), "");
/// ```
#[must_use]
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            PARENT => match segments.last() {
                Some(&last) if last != PARENT => {
                    segments.pop();
                }
                _ => segments.push(PARENT),
            },
            other => segments.push(other),
        }
    }

    segments.join("/")
}

/// Returns `true` when a normalized path points above the tree root.
#[must_use]
pub fn escapes_root(normalized: &str) -> bool {
    normalized == PARENT || normalized.starts_with("../")
}

/// Lists the directories containing `normalized`, most specific first.
///
/// The final entry is always `""`, the tree root. The path itself is never
/// included, even when it names a directory.
///
/// ```
/// use owners::path::ancestors;
///
/// assert_eq!(ancestors("a/b/c.go"), vec!["a/b", "a", ""]);
/// assert_eq!(ancestors("root.go"), vec![""]);
/// ```
#[must_use]
pub fn ancestors(normalized: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = normalized;

    while let Some(index) = current.rfind('/') {
        current = &current[..index];
        chain.push(current.to_owned());
    }
    chain.push(String::new());
    chain
}

/// Strips the `dir/` prefix from `path`.
///
/// Both arguments must already be normalized and `dir` must be one of the
/// [`ancestors`] of `path`. The root directory (`""`) leaves `path` unchanged.
#[must_use]
pub fn relative_to<'a>(path: &'a str, dir: &str) -> &'a str {
    if dir.is_empty() {
        return path;
    }
    path.strip_prefix(dir)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path)
}
