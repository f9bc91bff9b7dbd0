//! Cycle guard: directories currently open on the recursion stack

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Normalized keys of the directories between the walk root and the
/// directory being listed.
///
/// This is a stack, not a memo: keys leave the set when their directory is
/// finished, so the same target may be expanded again under another
/// parent. Only links back to an open ancestor are cut.
#[derive(Debug, Default)]
pub struct VisitedPathSet {
    open: HashSet<PathBuf>,
}

impl VisitedPathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalized key for `path`: the canonical path (symlinks resolved),
    /// or the absolute path when it cannot be canonicalized. Keys are
    /// lowercased on Windows where the file system ignores case.
    pub fn key_for(path: &Path) -> PathBuf {
        let resolved = fs::canonicalize(path)
            .or_else(|_| std::path::absolute(path))
            .unwrap_or_else(|_| path.to_path_buf());
        fold_case(resolved)
    }

    pub fn contains(&self, key: &Path) -> bool {
        self.open.contains(key)
    }

    /// Returns `false` when the key was already open.
    pub fn insert(&mut self, key: PathBuf) -> bool {
        self.open.insert(key)
    }

    pub fn remove(&mut self, key: &Path) -> bool {
        self.open.remove(key)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

#[cfg(windows)]
fn fold_case(path: PathBuf) -> PathBuf {
    PathBuf::from(path.to_string_lossy().to_lowercase())
}

#[cfg(not(windows))]
fn fold_case(path: PathBuf) -> PathBuf {
    path
}
