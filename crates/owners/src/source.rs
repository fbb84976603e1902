//! Storage readers for declaration files.
//!
//! The loader never touches the filesystem directly. It asks a
//! [`DeclarationSource`] for the bytes of a directory's declaration file, so
//! the same resolution logic runs over a checkout on disk, an in-memory tree
//! or any other content store.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name looked up in every directory when none is configured.
pub const DEFAULT_DECLARATION_FILE: &str = "OWNERS";

/// Reads the declaration file belonging to a directory.
pub trait DeclarationSource {
    /// Returns the raw declaration bytes for `dir`, or `Ok(None)` when the
    /// directory has no declaration file or does not exist.
    ///
    /// `dir` is a normalized, tree-relative directory; the root is the empty
    /// path.
    fn read_declaration(&self, dir: &Path) -> io::Result<Option<Vec<u8>>>;

    /// Returns the path used to describe `dir`'s declaration in diagnostics.
    fn declaration_path(&self, dir: &Path) -> PathBuf {
        dir.join(DEFAULT_DECLARATION_FILE)
    }
}

impl<S: DeclarationSource + ?Sized> DeclarationSource for &S {
    fn read_declaration(&self, dir: &Path) -> io::Result<Option<Vec<u8>>> {
        (**self).read_declaration(dir)
    }

    fn declaration_path(&self, dir: &Path) -> PathBuf {
        (**self).declaration_path(dir)
    }
}

/// Reads declaration files from a directory tree on disk.
#[derive(Clone, Debug)]
pub struct FsSource {
    root: PathBuf,
    file_name: String,
}

impl FsSource {
    /// Creates a reader rooted at `root` using [`DEFAULT_DECLARATION_FILE`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            file_name: DEFAULT_DECLARATION_FILE.to_owned(),
        }
    }

    /// Looks for `file_name` instead of the default in every directory.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Returns the tree root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the declaration file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl DeclarationSource for FsSource {
    fn read_declaration(&self, dir: &Path) -> io::Result<Option<Vec<u8>>> {
        let path = self.root.join(dir).join(&self.file_name);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if is_missing(&error) => Ok(None),
            Err(error) => Err(error),
        }
    }

    fn declaration_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}

/// A missing file and a path component that is a regular file both mean the
/// directory has no declaration.
fn is_missing(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// In-memory tree of declaration files keyed by directory.
///
/// ```
/// use owners::{MemorySource, Resolver};
///
/// let source = MemorySource::new()
///     .with_file("", "*.md @docs")
///     .with_file("src", "*.rs @core");
/// let resolver = Resolver::new(source);
///
/// assert_eq!(resolver.resolve("src/lib.rs").unwrap().required, ["@core"]);
/// assert_eq!(resolver.resolve("README.md").unwrap().required, ["@docs"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the declaration for `dir`.
    #[must_use]
    pub fn with_file(mut self, dir: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(dir, contents);
        self
    }

    /// Adds or replaces the declaration for `dir`.
    pub fn insert(&mut self, dir: &str, contents: impl Into<Vec<u8>>) {
        self.files
            .insert(crate::path::normalize(dir), contents.into());
    }
}

impl DeclarationSource for MemorySource {
    fn read_declaration(&self, dir: &Path) -> io::Result<Option<Vec<u8>>> {
        let key = crate::path::normalize(&dir.to_string_lossy());
        Ok(self.files.get(&key).cloned())
    }
}
