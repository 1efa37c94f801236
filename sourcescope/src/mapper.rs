//! Mapping a [`Source`] scope to concrete files.
//!
//! [`Source::includes`] answers "is this path in scope" without touching the
//! filesystem. [`map_source`] walks the include directories and returns every
//! file in scope.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::SourceError;
use crate::filter::{File, FileCollection, FilterDirectory, FilterDirectoryCollection};
use crate::source::Source;
use crate::Result;

impl Source {
    /// Check if a path is in scope.
    ///
    /// A path is in scope if:
    /// 1. It matches an include directory or an include file
    /// 2. It matches no exclude directory and no exclude file
    pub fn includes(&self, path: &Path) -> bool {
        // Check excludes first
        if self.exclude_directories().matches(path) || self.exclude_files().matches(path) {
            return false;
        }

        self.include_directories().matches(path) || self.include_files().matches(path)
    }
}

/// Expand the glob in a directory filter to the directories it names.
fn expand_directory(directory: &FilterDirectory) -> Result<Vec<PathBuf>> {
    let paths =
        glob::glob(directory.pattern().as_str()).map_err(|e| SourceError::InvalidGlob {
            pattern: directory.path().to_string(),
            message: e.to_string(),
        })?;

    let mut roots = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_dir() => roots.push(path),
            Ok(_) => {}
            Err(e) => warn!(
                path = %e.path().display(),
                error = %e.error(),
                "cannot read directory"
            ),
        }
    }

    Ok(roots)
}

/// Collect files below `root` that pass the directory's prefix/suffix test.
///
/// Every directory below `root` is descended into, hidden ones included, so
/// the result agrees with [`Source::includes`].
fn walk_directory(root: &Path, directory: &FilterDirectory, files: &mut Vec<PathBuf>) {
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(
                    path = %e.path().unwrap_or(root).display(),
                    error = %e,
                    "skipping unreadable entry"
                );
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let accepted = entry
            .file_name()
            .to_str()
            .is_some_and(|name| directory.accepts_file_name(name));

        if accepted {
            files.push(entry.into_path());
        }
    }
}

/// Discover every file in the scope of `source`.
///
/// Include directories are glob-expanded relative to the current working
/// directory unless absolute. Missing include files are skipped. The result
/// is sorted and free of duplicates.
pub fn map_source(source: &Source) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if !source.not_empty() {
        return Ok(files);
    }

    for directory in source.include_directories() {
        for root in expand_directory(directory)? {
            walk_directory(&root, directory, &mut files);
        }
    }

    for file in source.include_files() {
        if file.path().is_file() {
            files.push(file.path().to_path_buf());
        } else {
            warn!(path = %file.path().display(), "included file does not exist");
        }
    }

    let discovered = files.len();
    files.retain(|path| {
        !source.exclude_directories().matches(path) && !source.exclude_files().matches(path)
    });

    // Sort for deterministic output
    files.sort();
    files.dedup();

    debug!(discovered, in_scope = files.len(), "mapped source");

    Ok(files)
}

/// Discover every file in scope below `root`.
///
/// Relative filter paths are resolved against `root` instead of the current
/// working directory.
pub fn map_source_in(root: impl AsRef<Path>, source: &Source) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(SourceError::PathNotFound(root.to_path_buf()));
    }

    let files = map_source(&rebase(root, source)?)?;

    Ok(files
        .into_iter()
        .map(|p| p.strip_prefix(root).map(Path::to_path_buf).unwrap_or(p))
        .collect())
}

fn rebase_str(root: &Path, path: &str) -> String {
    if Path::new(path).is_absolute() {
        path.to_string()
    } else {
        let escaped = glob::Pattern::escape(&root.to_string_lossy());
        format!("{}/{}", escaped.trim_end_matches('/'), path)
    }
}

fn rebase_directories(
    root: &Path,
    set: &FilterDirectoryCollection,
) -> Result<FilterDirectoryCollection> {
    set.iter()
        .map(|d| -> Result<FilterDirectory> {
            Ok(FilterDirectory::new(&rebase_str(root, d.path()))?
                .prefix(d.file_prefix())
                .suffix(d.file_suffix()))
        })
        .collect()
}

fn rebase_files(root: &Path, set: &FileCollection) -> FileCollection {
    set.iter().map(|f| File::new(root.join(f.path()))).collect()
}

fn rebase(root: &Path, source: &Source) -> Result<Source> {
    Ok(source.with_scope(
        rebase_directories(root, source.include_directories())?,
        rebase_files(root, source.include_files()),
        rebase_directories(root, source.exclude_directories())?,
        rebase_files(root, source.exclude_files()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_test_files(dir: &Path) {
        fs::create_dir_all(dir.join("src/Util")).unwrap();
        fs::create_dir_all(dir.join("src/Generated")).unwrap();
        fs::create_dir_all(dir.join("src/.cache")).unwrap();
        fs::create_dir_all(dir.join("tests")).unwrap();
        fs::create_dir_all(dir.join("vendor/acme/lib")).unwrap();

        fs::write(dir.join("src/Kernel.php"), "<?php").unwrap();
        fs::write(dir.join("src/Util/Str.php"), "<?php").unwrap();
        fs::write(dir.join("src/Util/notes.txt"), "notes").unwrap();
        fs::write(dir.join("src/Generated/Proxy.php"), "<?php").unwrap();
        fs::write(dir.join("src/.cache/Cached.php"), "<?php").unwrap();
        fs::write(dir.join("src/bootstrap.php"), "<?php").unwrap();
        fs::write(dir.join("tests/KernelTest.php"), "<?php").unwrap();
        fs::write(dir.join("vendor/acme/lib/Acme.php"), "<?php").unwrap();
        fs::write(dir.join("functions.php"), "<?php").unwrap();
    }

    fn dirs(entries: &[(&str, &str)]) -> FilterDirectoryCollection {
        entries
            .iter()
            .map(|(path, suffix)| FilterDirectory::new(path).unwrap().suffix(suffix))
            .collect()
    }

    fn files(paths: &[&str]) -> FileCollection {
        paths.iter().map(|p| File::new(*p)).collect()
    }

    #[test]
    fn test_includes_respects_excludes() {
        let source = Source::builder()
            .include_directories(dirs(&[("src", ".php")]))
            .include_files(files(&["functions.php"]))
            .exclude_directories(dirs(&[("src/Generated", "")]))
            .exclude_files(files(&["src/bootstrap.php"]))
            .build()
            .unwrap();

        assert!(source.includes(Path::new("src/Kernel.php")));
        assert!(source.includes(Path::new("functions.php")));
        assert!(!source.includes(Path::new("src/Generated/Proxy.php")));
        assert!(!source.includes(Path::new("src/bootstrap.php")));
        assert!(!source.includes(Path::new("src/Util/notes.txt")));
        assert!(!source.includes(Path::new("vendor/acme/lib/Acme.php")));
    }

    #[test]
    fn test_empty_scope_includes_nothing() {
        let source = Source::default();
        assert!(!source.includes(Path::new("src/Kernel.php")));
    }

    #[test]
    fn test_map_source_in_directory() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let source = Source::builder()
            .include_directories(dirs(&[("src", ".php")]))
            .include_files(files(&["functions.php", "missing.php"]))
            .exclude_directories(dirs(&[("src/Generated", "")]))
            .exclude_files(files(&["src/bootstrap.php"]))
            .build()
            .unwrap();

        let found = map_source_in(temp.path(), &source).unwrap();

        assert_eq!(
            found,
            vec![
                PathBuf::from("functions.php"),
                PathBuf::from("src/.cache/Cached.php"),
                PathBuf::from("src/Kernel.php"),
                PathBuf::from("src/Util/Str.php"),
            ]
        );
    }

    #[test]
    fn test_map_source_expands_globs() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());
        fs::create_dir_all(temp.path().join("vendor/other/lib")).unwrap();
        fs::write(temp.path().join("vendor/other/lib/Other.php"), "<?php").unwrap();

        let source = Source::builder()
            .include_directories(dirs(&[("vendor/*/lib", ".php")]))
            .build()
            .unwrap();

        let found = map_source_in(temp.path(), &source).unwrap();

        assert_eq!(
            found,
            vec![
                PathBuf::from("vendor/acme/lib/Acme.php"),
                PathBuf::from("vendor/other/lib/Other.php"),
            ]
        );
    }

    #[test]
    fn test_map_source_deduplicates_overlapping_includes() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let source = Source::builder()
            .include_directories(dirs(&[("src/Util", ".php"), ("src", ".php")]))
            .include_files(files(&["src/Kernel.php"]))
            .exclude_files(files(&["src/bootstrap.php"]))
            .exclude_directories(dirs(&[("src/Generated", "")]))
            .build()
            .unwrap();

        let found = map_source_in(temp.path(), &source).unwrap();

        assert_eq!(
            found,
            vec![
                PathBuf::from("src/.cache/Cached.php"),
                PathBuf::from("src/Kernel.php"),
                PathBuf::from("src/Util/Str.php"),
            ]
        );
    }

    #[test]
    fn test_includes_agrees_with_mapped_files() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let source = Source::builder()
            .include_directories(dirs(&[("src/", ".php"), ("vendor/*/lib", ".php")]))
            .include_files(files(&["functions.php"]))
            .exclude_directories(dirs(&[("src/Generated", "")]))
            .exclude_files(files(&["src/bootstrap.php"]))
            .build()
            .unwrap();

        let found = map_source_in(temp.path(), &source).unwrap();

        let candidates = [
            "functions.php",
            "src/.cache/Cached.php",
            "src/Kernel.php",
            "src/Util/Str.php",
            "src/Util/notes.txt",
            "src/Generated/Proxy.php",
            "src/bootstrap.php",
            "tests/KernelTest.php",
            "vendor/acme/lib/Acme.php",
        ];

        for candidate in candidates {
            let path = Path::new(candidate);
            assert_eq!(
                source.includes(path),
                found.iter().any(|p| p == path),
                "{candidate}"
            );
        }
        assert_eq!(found.len(), 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_map_source_skips_unreadable_entries() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());
        std::os::unix::fs::symlink(
            temp.path().join("nowhere"),
            temp.path().join("src/Dangling.php"),
        )
        .unwrap();

        let source = Source::builder()
            .include_directories(dirs(&[("src/Util", ".php")]))
            .build()
            .unwrap();
        let found = map_source_in(temp.path(), &source).unwrap();
        assert_eq!(found, vec![PathBuf::from("src/Util/Str.php")]);

        let source = Source::builder()
            .include_directories(dirs(&[("src", ".php")]))
            .exclude_directories(dirs(&[("src/Generated", "")]))
            .build()
            .unwrap();
        let found = map_source_in(temp.path(), &source).unwrap();
        assert!(!found.iter().any(|p| p.ends_with("Dangling.php")));
        assert!(found.contains(&PathBuf::from("src/Kernel.php")));
    }

    #[test]
    fn test_map_empty_source() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let found = map_source_in(temp.path(), &Source::default()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_map_source_nonexistent_root() {
        let result = map_source_in("/nonexistent/path", &Source::default());
        assert!(matches!(result, Err(SourceError::PathNotFound(_))));
    }

    #[test]
    fn test_rebase_keeps_policy() {
        let source = Source::builder()
            .baseline("baseline.xml")
            .ignore_baseline(true)
            .include_directories(dirs(&[("src", ".php")]))
            .build()
            .unwrap();

        let rebased = rebase(Path::new("/project"), &source).unwrap();
        assert!(rebased.has_baseline());
        assert!(!rebased.use_baseline());
        assert_eq!(rebased.restrictions(), source.restrictions());
        assert_eq!(
            rebased.include_directories().iter().next().unwrap().path(),
            "/project/src"
        );
        assert!(rebased.includes(Path::new("/project/src/A.php")));
    }
}
