//! Directory and file filter sets.
//!
//! These are the building blocks of a [`Source`](crate::Source) scope. A
//! [`FilterDirectory`] selects files below a directory (optionally a glob)
//! by file-name prefix and suffix; a [`File`] selects exactly one path.
//! Matching here is purely lexical; nothing touches the filesystem.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use serde::Serialize;

use crate::error::SourceError;
use crate::Result;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A directory filter entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterDirectory {
    path: String,
    prefix: String,
    suffix: String,
    #[serde(skip)]
    pattern: Pattern,
}

impl FilterDirectory {
    /// Create a directory filter. The path may contain glob wildcards.
    ///
    /// A trailing `/` is ignored when matching; `path()` keeps it.
    ///
    /// ```rust
    /// use std::path::Path;
    /// use sourcescope::FilterDirectory;
    ///
    /// let dir = FilterDirectory::new("src/").unwrap();
    /// assert_eq!(dir.path(), "src/");
    /// assert!(dir.matches(Path::new("src/Kernel.php")));
    /// ```
    pub fn new(path: &str) -> Result<Self> {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { path } else { trimmed };

        let pattern = Pattern::new(trimmed).map_err(|e| SourceError::InvalidGlob {
            pattern: path.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            path: path.to_string(),
            prefix: String::new(),
            suffix: String::new(),
            pattern,
        })
    }

    /// Builder: only select files whose name starts with `prefix`.
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Builder: only select files whose name ends with `suffix`.
    pub fn suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    /// Directory path as written.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Required file-name prefix (empty for any).
    pub fn file_prefix(&self) -> &str {
        &self.prefix
    }

    /// Required file-name suffix (empty for any).
    pub fn file_suffix(&self) -> &str {
        &self.suffix
    }

    /// Glob pattern compiled from the directory path.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Whether `name` passes the prefix/suffix test.
    pub fn accepts_file_name(&self, name: &str) -> bool {
        name.starts_with(&self.prefix) && name.ends_with(&self.suffix)
    }

    /// Check if a file path lies below this directory and passes the
    /// prefix/suffix test.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if !self.accepts_file_name(name) {
            return false;
        }

        path.ancestors()
            .skip(1)
            .filter(|dir| !dir.as_os_str().is_empty())
            .any(|dir| self.pattern.matches_path_with(dir, MATCH_OPTIONS))
    }
}

/// A single-file filter entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct File {
    path: PathBuf,
}

impl File {
    /// Create a file filter for exactly `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The selected file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if `path` is this file.
    pub fn matches(&self, path: &Path) -> bool {
        self.path == path
    }
}

/// Ordered collection of [`FilterDirectory`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterDirectoryCollection {
    directories: Vec<FilterDirectory>,
}

impl FilterDirectoryCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from directories in order.
    pub fn from_vec(directories: Vec<FilterDirectory>) -> Self {
        Self { directories }
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FilterDirectory> {
        self.directories.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.directories.len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    /// True if there is at least one entry.
    pub fn not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// True if any directory in the collection matches `path`.
    pub fn matches(&self, path: &Path) -> bool {
        self.directories.iter().any(|d| d.matches(path))
    }
}

impl FromIterator<FilterDirectory> for FilterDirectoryCollection {
    fn from_iter<I: IntoIterator<Item = FilterDirectory>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FilterDirectoryCollection {
    type Item = &'a FilterDirectory;
    type IntoIter = std::slice::Iter<'a, FilterDirectory>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ordered collection of [`File`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileCollection {
    files: Vec<File>,
}

impl FileCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from files in order.
    pub fn from_vec(files: Vec<File>) -> Self {
        Self { files }
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, File> {
        self.files.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// True if there is at least one entry.
    pub fn not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// True if any file in the collection is `path`.
    pub fn matches(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f.matches(path))
    }
}

impl FromIterator<File> for FileCollection {
    fn from_iter<I: IntoIterator<Item = File>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FileCollection {
    type Item = &'a File;
    type IntoIter = std::slice::Iter<'a, File>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
