use std::path::Path;

use crate::debug_owners::{trace_declaration_absent, trace_declaration_loaded};
use crate::error::OwnersError;
use crate::parse::parse_declaration_bytes;
use crate::path::normalize;
use crate::{Declaration, DeclarationSource};

/// Loads and parses per-directory declaration files.
///
/// Directories without a declaration file, including directories that do not
/// exist at all, load as an empty [`Declaration`]. Only unreadable or
/// malformed files are errors.
#[derive(Clone, Debug)]
pub struct DeclarationLoader<S> {
    source: S,
}

impl<S: DeclarationSource> DeclarationLoader<S> {
    /// Creates a loader reading through `source`.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns the underlying storage reader.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Loads the declaration for `dir`.
    ///
    /// `dir` is normalized first, so `""`, `.` and `/` all load the root
    /// declaration.
    pub fn load(&self, dir: &str) -> Result<Declaration, OwnersError> {
        let dir = normalize(dir);
        self.load_normalized(&dir)
    }

    pub(crate) fn load_normalized(&self, dir: &str) -> Result<Declaration, OwnersError> {
        let dir_path = Path::new(dir);
        let bytes = self
            .source
            .read_declaration(dir_path)
            .map_err(|source| OwnersError::Read {
                path: self.source.declaration_path(dir_path),
                source,
            })?;

        let Some(bytes) = bytes else {
            trace_declaration_absent(dir);
            return Ok(Declaration::default());
        };

        let declaration =
            parse_declaration_bytes(&bytes).map_err(|source| OwnersError::Malformed {
                path: self.source.declaration_path(dir_path),
                source,
            })?;
        trace_declaration_loaded(dir, declaration.sections().len(), declaration.rule_count());
        Ok(declaration)
    }
}
