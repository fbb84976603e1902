use std::fmt;

use crate::OwnersPattern;

/// Name given to rules that appear before the first section header.
pub const DEFAULT_SECTION_NAME: &str = "required";

/// Approvals requested by a section that does not declare a count.
pub const DEFAULT_APPROVALS: u32 = 1;

/// Kind of a declaration section.
///
/// Required and optional sections are resolved independently: a match in
/// one never blocks or implies a match in the other.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SectionKind {
    /// Owners who must review a change (`[name]` headers).
    Required,
    /// Owners who may optionally be notified (`^[name]` headers).
    Optional,
}

impl SectionKind {
    /// Both kinds in resolution order.
    pub const ALL: [Self; 2] = [Self::Required, Self::Optional];
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::Optional => f.write_str("optional"),
        }
    }
}

/// One ownership declaration: a pattern and the owners it assigns.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    pub(crate) pattern: OwnersPattern,
    pub(crate) owners: Vec<String>,
}

impl Rule {
    /// Creates a rule for an already compiled pattern.
    pub fn new<I, S>(pattern: OwnersPattern, owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pattern,
            owners: owners.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the rule's pattern.
    #[must_use]
    pub const fn pattern(&self) -> &OwnersPattern {
        &self.pattern
    }

    /// Returns the owners in declaration order.
    #[must_use]
    pub fn owners(&self) -> &[String] {
        &self.owners
    }
}

/// Named group of rules sharing a kind and approval count.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Section {
    pub(crate) name: String,
    pub(crate) kind: SectionKind,
    pub(crate) approvals: u32,
    pub(crate) rules: Vec<Rule>,
}

impl Section {
    /// Creates an empty section requesting [`DEFAULT_APPROVALS`].
    pub fn new(name: impl Into<String>, kind: SectionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            approvals: DEFAULT_APPROVALS,
            rules: Vec::new(),
        }
    }

    /// Sets the number of approvals requested from this section's owners.
    #[must_use]
    pub const fn with_approvals(mut self, approvals: u32) -> Self {
        self.approvals = approvals;
        self
    }

    /// Appends a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the section name as written in its header.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the section kind.
    #[must_use]
    pub const fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Returns the approval count. The resolver carries it through untouched.
    #[must_use]
    pub const fn approvals(&self) -> u32 {
        self.approvals
    }

    /// Returns the rules in file order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Parsed contents of one directory's declaration file.
///
/// A directory without a declaration file is represented by the default
/// value, which has no sections and matches nothing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Declaration {
    pub(crate) sections: Vec<Section>,
}

impl Declaration {
    /// Builds a declaration from sections in file order.
    pub fn new(sections: impl IntoIterator<Item = Section>) -> Self {
        Self {
            sections: sections.into_iter().collect(),
        }
    }

    /// Returns the sections in file order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns `true` if the declaration contains no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of rules across all sections.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.sections.iter().map(|section| section.rules.len()).sum()
    }

    /// Finds the rule of `kind` that decides ownership of `relative_path`.
    ///
    /// Every section of the requested kind is considered in file order and
    /// the last matching rule wins, so a correction appended to the end of
    /// the file overrides an earlier declaration.
    #[must_use]
    pub fn last_match(&self, kind: SectionKind, relative_path: &str) -> Option<(&Section, &Rule)> {
        self.sections
            .iter()
            .rev()
            .filter(|section| section.kind == kind)
            .find_map(|section| {
                section
                    .rules
                    .iter()
                    .rev()
                    .find(|rule| rule.pattern.matches(relative_path))
                    .map(|rule| (section, rule))
            })
    }
}
