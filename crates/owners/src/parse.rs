//! Declaration file grammar.
//!
//! ```text
//! # comment
//! root.go @root               <- implicit [required] section
//! [Backend][2]
//! *.go @backend @core
//! ^[Docs]
//! docs/ @writers
//! ```
//!
//! Each non-blank, non-comment line is either a section header or a rule.
//! `[name]` opens a required section, `^[name]` an optional one, and either
//! may carry an approval count as a second bracketed group. Rules are a
//! pattern followed by zero or more whitespace separated owners.
//!
//! A line whose first character is `[` or `^` is always read as a header,
//! so a rule pattern cannot start with either. Write `/[abc].go` for a
//! leading character class (the leading `/` is dropped when the pattern is
//! normalized) and `\[abc].go` or `\^x.go` for a literal bracket or caret.

use crate::declaration::{DEFAULT_SECTION_NAME, Declaration, Rule, Section, SectionKind};
use crate::error::{ParseError, ParseErrorKind};
use crate::OwnersPattern;

const COMMENT_MARKER: char = '#';
const OPTIONAL_MARKER: char = '^';

/// Parses the text of a declaration file.
///
/// An empty file, or one holding only blank lines and comments, yields a
/// declaration with no sections.
///
/// # Examples
///
/// ```
/// use owners::{SectionKind, parse_declaration};
///
/// let declaration = parse_declaration("a.go @a\n^[optional]\nb.go @b\n").unwrap();
/// let sections = declaration.sections();
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].name(), "required");
/// assert_eq!(sections[1].kind(), SectionKind::Optional);
/// ```
pub fn parse_declaration(text: &str) -> Result<Declaration, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut sections: Vec<Section> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }

        if let Some((kind, body)) = header_start(line) {
            let section = parse_header(line, kind, body)
                .map_err(|kind| ParseError::new(line_number, kind))?;
            sections.push(section);
            continue;
        }

        let rule = parse_rule(line).map_err(|kind| ParseError::new(line_number, kind))?;
        match sections.last_mut() {
            Some(section) => section.rules.push(rule),
            None => sections
                .push(Section::new(DEFAULT_SECTION_NAME, SectionKind::Required).with_rule(rule)),
        }
    }

    Ok(Declaration { sections })
}

/// Parses raw declaration bytes, rejecting content that is not UTF-8.
pub fn parse_declaration_bytes(bytes: &[u8]) -> Result<Declaration, ParseError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => parse_declaration(text),
        Err(error) => {
            let line = bytes[..error.valid_up_to()]
                .iter()
                .filter(|&&byte| byte == b'\n')
                .count()
                + 1;
            Err(ParseError::new(line, ParseErrorKind::InvalidUtf8))
        }
    }
}

fn header_start(line: &str) -> Option<(SectionKind, &str)> {
    if let Some(body) = line.strip_prefix(OPTIONAL_MARKER) {
        Some((SectionKind::Optional, body))
    } else if line.starts_with('[') {
        Some((SectionKind::Required, line))
    } else {
        None
    }
}

fn parse_header(line: &str, kind: SectionKind, body: &str) -> Result<Section, ParseErrorKind> {
    let unrecognized = || ParseErrorKind::UnrecognizedHeader(line.to_owned());

    let (name, rest) = bracketed(body).ok_or_else(unrecognized)?;
    if name.trim().is_empty() {
        return Err(unrecognized());
    }
    let section = Section::new(name, kind);
    if rest.is_empty() {
        return Ok(section);
    }

    let (count, tail) = bracketed(rest).ok_or_else(unrecognized)?;
    if !tail.is_empty() {
        return Err(unrecognized());
    }
    match count.parse::<u32>() {
        Ok(approvals) if approvals >= 1 => Ok(section.with_approvals(approvals)),
        _ => Err(ParseErrorKind::InvalidApprovals(count.to_owned())),
    }
}

/// Splits `[inner]rest` into `inner` and `rest`.
fn bracketed(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_prefix('[')?;
    let end = inner.find(']')?;
    let name = &inner[..end];
    if name.contains('[') {
        return None;
    }
    Some((name, &inner[end + 1..]))
}

fn parse_rule(line: &str) -> Result<Rule, ParseErrorKind> {
    let mut tokens = line.split_whitespace();
    let Some(raw) = tokens.next() else {
        return Err(ParseErrorKind::EmptyPattern(String::new()));
    };

    let pattern = OwnersPattern::new(raw).map_err(|source| ParseErrorKind::InvalidPattern {
        pattern: raw.to_owned(),
        source,
    })?;
    if pattern.is_empty() {
        return Err(ParseErrorKind::EmptyPattern(raw.to_owned()));
    }

    Ok(Rule::new(pattern, tokens))
}
