#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `owners` decides which owners must review, and which may optionally be
//! notified of, a change to a path inside a version-controlled tree.
//! Ownership is declared in per-directory `OWNERS` files. A path's owners are
//! derived from the declaration in its own directory and every ancestor up to
//! the tree root, with deeper declarations overriding shallower ones.
//!
//! # Design
//!
//! - [`path`] canonicalizes tree-relative paths so equivalent spellings
//!   compare equal.
//! - [`OwnersPattern`] compiles a declared glob with [`globset`]. `*` stays
//!   inside one segment and requires at least one character; a `**` segment
//!   spans zero or more directories.
//! - [`parse_declaration`] turns declaration text into a [`Declaration`]: an
//!   ordered list of [`Section`]s, each of [`SectionKind::Required`] or
//!   [`SectionKind::Optional`], holding ordered [`Rule`]s.
//! - [`DeclarationLoader`] reads declarations through a
//!   [`DeclarationSource`] ([`FsSource`] for a checkout, [`MemorySource`] for
//!   in-memory trees). A missing file loads as an empty declaration.
//! - [`Resolver`] walks the directory chain from the path's parent up to the
//!   root and picks, per section kind, the closest directory with a matching
//!   rule.
//!
//! # Invariants
//!
//! - Within one declaration the last matching rule of a kind wins.
//! - Across directories the deepest matching declaration wins per kind;
//!   required and optional owners are resolved independently.
//! - A path matched by no rule resolves to an empty [`OwnersMatch`], never an
//!   error.
//! - Resolution is a pure function of the declarations and the queried path;
//!   nothing is cached between calls.
//!
//! # Errors
//!
//! [`OwnersError::Malformed`] reports a declaration that cannot be parsed,
//! with the file and line. [`OwnersError::Read`] carries storage failures
//! other than a missing file. Either aborts the query that hit it.
//!
//! # Examples
//!
//! ```
//! use owners::{MemorySource, OwnersMatch, Resolver};
//!
//! let tree = MemorySource::new()
//!     .with_file("", "[required]\nroot.go @root\n^[optional]\n**/*.md @docs\n")
//!     .with_file("a", "a.go @a_overridden\na.go @a\n");
//! let resolver = Resolver::new(tree);
//!
//! assert_eq!(
//!     resolver.resolve("a/a.go").unwrap(),
//!     OwnersMatch { required: vec!["@a".into()], optional: vec![] },
//! );
//! assert_eq!(resolver.resolve("a/README.md").unwrap().optional, ["@docs"]);
//! assert!(resolver.resolve("a/unknown.go").unwrap().is_empty());
//! ```

pub mod debug_owners;
mod declaration;
mod error;
mod loader;
mod parse;
pub mod path;
mod pattern;
mod resolver;
mod source;

pub use declaration::{
    DEFAULT_APPROVALS, DEFAULT_SECTION_NAME, Declaration, Rule, Section, SectionKind,
};
pub use error::{OwnersError, ParseError, ParseErrorKind};
pub use loader::DeclarationLoader;
pub use parse::{parse_declaration, parse_declaration_bytes};
pub use pattern::OwnersPattern;
pub use resolver::{Attribution, OwnersMatch, Resolution, Resolver};
pub use source::{DEFAULT_DECLARATION_FILE, DeclarationSource, FsSource, MemorySource};
