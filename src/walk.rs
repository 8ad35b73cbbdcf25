//! Recursive source tree enumeration.

use std::path::{Path, PathBuf};

use globset::GlobSet;
use walkdir::{DirEntry, WalkDir};

use crate::error::{AnalyzeError, Result};

/// Directory names never descended into, besides hidden directories.
const PRUNED_DIRS: &[&str] = &["node_modules"];

/// Walks a project root and yields regular files matching a predicate.
///
/// Traversal order is whatever the filesystem returns. Callers that need
/// stable output sort the collected paths.
pub struct SourceWalker {
    root: PathBuf,
    excluded: Option<GlobSet>,
}

impl SourceWalker {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            excluded: None,
        }
    }

    /// Skip files and directories whose root-relative path matches `globs`.
    pub fn exclude(mut self, globs: Option<GlobSet>) -> Self {
        self.excluded = globs;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yield every regular file under the root accepted by `predicate`.
    ///
    /// Fails only when the root is missing or not a directory. Entries that
    /// cannot be read (permission denied, broken symlink, symlink loop) are
    /// skipped.
    pub fn walk<'a, F>(&'a self, predicate: F) -> Result<impl Iterator<Item = PathBuf> + 'a>
    where
        F: Fn(&Path) -> bool + 'a,
    {
        if !self.root.is_dir() {
            return Err(AnalyzeError::NotFound(self.root.clone()));
        }

        let iter = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(move |e| self.keep_entry(e))
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(DirEntry::into_path)
            .filter(move |p| predicate(p.as_path()));

        Ok(iter)
    }

    /// Collect matching files sorted by path.
    pub fn collect_sorted<'a, F>(&'a self, predicate: F) -> Result<Vec<PathBuf>>
    where
        F: Fn(&Path) -> bool + 'a,
    {
        let mut files: Vec<PathBuf> = self.walk(predicate)?.collect();
        files.sort();
        Ok(files)
    }

    fn keep_entry(&self, entry: &DirEntry) -> bool {
        // The root is always walked, even when its own name looks hidden.
        if entry.depth() == 0 {
            return true;
        }

        if entry.file_type().is_dir() {
            let name = entry.file_name().to_string_lossy();
            if name.starts_with('.') || PRUNED_DIRS.contains(&name.as_ref()) {
                return false;
            }
        }

        match &self.excluded {
            Some(globs) => {
                let rel = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
                !globs.is_match(rel)
            }
            None => true,
        }
    }
}

/// Predicate matching files with the given extension (without the dot).
pub fn has_extension(ext: &'static str) -> impl Fn(&Path) -> bool {
    move |p: &Path| p.extension().and_then(|e| e.to_str()) == Some(ext)
}

/// Predicate for Java source files.
pub fn is_java_source(path: &Path) -> bool {
    has_extension("java")(path)
}
