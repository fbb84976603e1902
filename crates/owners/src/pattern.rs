use std::fmt;

use globset::{GlobBuilder, GlobMatcher};

use crate::path::normalize;

/// Glob pattern declared by an ownership rule, compiled for matching.
///
/// Patterns are evaluated against paths relative to the directory whose
/// declaration file contains the rule, and must account for every segment of
/// that path:
///
/// - `*` matches a non-empty run of characters inside one segment and never
///   crosses a `/`.
/// - `**` as a whole segment matches zero or more complete segments, so
///   `**/x` matches `x` as well as `a/b/x`.
/// - A trailing `/` marks a directory rule: `docs/` owns everything beneath
///   `docs` and is stored as `docs/**`.
///
/// `?`, character classes and backslash escapes follow [`globset`] syntax.
///
/// # Examples
///
/// ```
/// use owners::OwnersPattern;
///
/// let pattern = OwnersPattern::new("/a/**/*.s").unwrap();
/// assert_eq!(pattern.as_str(), "a/**/*.s");
/// assert!(pattern.matches("a/x.s"));
/// assert!(pattern.matches("a/b/c/x.s"));
/// assert!(!pattern.matches("b/x.s"));
/// ```
#[derive(Clone)]
pub struct OwnersPattern {
    text: String,
    matcher: GlobMatcher,
}

impl OwnersPattern {
    /// Normalizes `pattern` and compiles it.
    ///
    /// A pattern that normalizes to nothing (`.`, `/`) compiles to a matcher
    /// that never matches; the declaration parser rejects such patterns
    /// before they reach a rule.
    pub fn new(pattern: &str) -> Result<Self, globset::Error> {
        let mut text = normalize(pattern);
        if pattern.ends_with('/') && !text.is_empty() && !text.ends_with("**") {
            text.push_str("/**");
        }

        let glob = GlobBuilder::new(&expand_single_stars(&text))
            .literal_separator(true)
            .backslash_escape(true)
            .build()?;

        Ok(Self {
            text,
            matcher: glob.compile_matcher(),
        })
    }

    /// Returns the normalized pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns `true` if the pattern normalized to the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns `true` when the pattern matches the whole of `relative_path`.
    ///
    /// `relative_path` must already be normalized. The empty path (the
    /// declaring directory itself) never matches.
    #[must_use]
    pub fn matches(&self, relative_path: &str) -> bool {
        !relative_path.is_empty() && self.matcher.is_match(relative_path)
    }
}

impl PartialEq for OwnersPattern {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for OwnersPattern {}

impl fmt::Debug for OwnersPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OwnersPattern").field(&self.text).finish()
    }
}

impl fmt::Display for OwnersPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Rewrites every single-segment `*` run into `?*`.
///
/// globset lets `*` match the empty string; ownership patterns require at
/// least one character. Whole-segment `**`, escaped stars and stars inside
/// character classes are copied unchanged.
fn expand_single_stars(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);

    for (index, segment) in pattern.split('/').enumerate() {
        if index > 0 {
            out.push('/');
        }
        if segment == "**" {
            out.push_str(segment);
            continue;
        }

        let mut chars = segment.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => {
                    out.push(ch);
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '[' => {
                    out.push(ch);
                    if let Some(negation) = chars.next_if(|&c| c == '!' || c == '^') {
                        out.push(negation);
                    }
                    if let Some(bracket) = chars.next_if_eq(&']') {
                        out.push(bracket);
                    }
                    for member in chars.by_ref() {
                        out.push(member);
                        if member == ']' {
                            break;
                        }
                    }
                }
                '*' => {
                    while chars.next_if_eq(&'*').is_some() {}
                    out.push_str("?*");
                }
                other => out.push(other),
            }
        }
    }

    out
}
