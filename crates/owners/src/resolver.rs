use std::path::PathBuf;

use crate::debug_owners::{trace_query_skipped, trace_resolved, trace_rule_matched};
use crate::path::{ancestors, escapes_root, normalize, relative_to};
use crate::{Declaration, DeclarationLoader, DeclarationSource, FsSource, OwnersError, SectionKind};

/// Owners resolved for one path.
///
/// Both lists keep the order of the winning rule's declaration and are not
/// deduplicated. An empty list means no rule of that kind applies.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnersMatch {
    /// Owners who must review the change.
    pub required: Vec<String>,
    /// Owners who may optionally be notified.
    pub optional: Vec<String>,
}

impl OwnersMatch {
    /// Returns `true` when neither kind has owners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.optional.is_empty()
    }
}

/// Where the owners of one section kind came from.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribution {
    /// Directory whose declaration supplied the rule (`""` for the root).
    pub directory: String,
    /// Name of the section holding the rule.
    pub section: String,
    /// Approval count declared by that section.
    pub approvals: u32,
    /// Normalized pattern of the winning rule.
    pub pattern: String,
    /// Owners listed by the winning rule.
    pub owners: Vec<String>,
}

/// Resolution result carrying the provenance of each section kind.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// Winning required rule, if any directory declared one.
    pub required: Option<Attribution>,
    /// Winning optional rule, if any directory declared one.
    pub optional: Option<Attribution>,
}

impl Resolution {
    /// Returns the attribution for `kind`.
    #[must_use]
    pub const fn get(&self, kind: SectionKind) -> Option<&Attribution> {
        match kind {
            SectionKind::Required => self.required.as_ref(),
            SectionKind::Optional => self.optional.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: SectionKind) -> &mut Option<Attribution> {
        match kind {
            SectionKind::Required => &mut self.required,
            SectionKind::Optional => &mut self.optional,
        }
    }

    /// Drops provenance and keeps only the owner lists.
    #[must_use]
    pub fn into_match(self) -> OwnersMatch {
        OwnersMatch {
            required: self.required.map(|a| a.owners).unwrap_or_default(),
            optional: self.optional.map(|a| a.owners).unwrap_or_default(),
        }
    }
}

/// Computes the owners of a path from the declarations along its directory
/// chain.
///
/// For each section kind the directory closest to the path that declares a
/// matching rule decides the owners; shallower directories only apply when
/// every deeper directory is silent for that kind. Within one declaration the
/// last matching rule wins.
///
/// Every resolution re-reads the declarations it needs and shares no mutable
/// state, so one resolver can serve concurrent queries.
///
/// # Examples
///
/// ```
/// use owners::{MemorySource, Resolver};
///
/// let resolver = Resolver::new(
///     MemorySource::new()
///         .with_file("", "a/**/*.s @doublestar\na/a.go @root_overridden\nb/*.s @singlestar")
///         .with_file("a", "a.go @a"),
/// );
///
/// assert_eq!(resolver.resolve("a/a.go").unwrap().required, ["@a"]);
/// assert_eq!(resolver.resolve("a/b/c/d/x.s").unwrap().required, ["@doublestar"]);
/// assert_eq!(resolver.resolve("b/x.s").unwrap().required, ["@singlestar"]);
/// assert!(resolver.resolve("b/c/x.s").unwrap().is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct Resolver<S> {
    loader: DeclarationLoader<S>,
}

impl Resolver<FsSource> {
    /// Creates a resolver over the tree at `root` using the default
    /// declaration file name.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::new(FsSource::new(root))
    }
}

impl<S: DeclarationSource> Resolver<S> {
    /// Creates a resolver reading declarations through `source`.
    pub const fn new(source: S) -> Self {
        Self {
            loader: DeclarationLoader::new(source),
        }
    }

    /// Returns the declaration loader.
    pub const fn loader(&self) -> &DeclarationLoader<S> {
        &self.loader
    }

    /// Loads the declaration of a single directory.
    pub fn load(&self, dir: &str) -> Result<Declaration, OwnersError> {
        self.loader.load(dir)
    }

    /// Returns the required and optional owners of `path`.
    ///
    /// Paths naming the root itself, or pointing outside the tree, own
    /// nothing. Any unreadable or malformed declaration on the directory
    /// chain fails the whole query.
    pub fn resolve(&self, path: &str) -> Result<OwnersMatch, OwnersError> {
        self.resolve_detailed(path).map(Resolution::into_match)
    }

    /// Like [`resolve`](Self::resolve) but records which declaration
    /// supplied each owner list.
    pub fn resolve_detailed(&self, path: &str) -> Result<Resolution, OwnersError> {
        let normalized = normalize(path);
        if normalized.is_empty() || escapes_root(&normalized) {
            trace_query_skipped(path);
            return Ok(Resolution::default());
        }

        let mut resolution = Resolution::default();

        // Deeper directories are visited first. Shallower ones are still
        // loaded after both kinds are decided so broken files never hide.
        for dir in ancestors(&normalized) {
            let declaration = self.loader.load_normalized(&dir)?;
            if declaration.is_empty() {
                continue;
            }

            let relative = relative_to(&normalized, &dir);
            for kind in SectionKind::ALL {
                let slot = resolution.slot_mut(kind);
                if slot.is_some() {
                    continue;
                }
                if let Some((section, rule)) = declaration.last_match(kind, relative) {
                    trace_rule_matched(&dir, kind, rule.pattern().as_str(), relative);
                    *slot = Some(Attribution {
                        directory: dir.clone(),
                        section: section.name().to_owned(),
                        approvals: section.approvals(),
                        pattern: rule.pattern().as_str().to_owned(),
                        owners: rule.owners().to_vec(),
                    });
                }
            }
        }

        trace_resolved(
            &normalized,
            resolution.required.as_ref().map_or(0, |a| a.owners.len()),
            resolution.optional.as_ref().map_or(0, |a| a.owners.len()),
        );
        Ok(resolution)
    }
}
