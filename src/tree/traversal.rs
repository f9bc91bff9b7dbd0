//! Common tree traversal logic shared by TreeWalker and StreamingWalker.
//!
//! Both walkers ask `BaseTraversal` whether a directory may be descended
//! into and keep their per-walk state in `WalkState`, so ordering, depth
//! limiting, symlink handling and cycle cut-offs are identical whichever
//! representation is produced.

use std::fs;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::Cancelled;

use super::catalog::CatalogEntry;
use super::config::WalkerConfig;
use super::control::{PROGRESS_INTERVAL, WalkControl};
use super::visited::VisitedPathSet;

/// What to do with a directory entry.
#[derive(Debug, PartialEq, Eq)]
pub enum Descent {
    /// Emit without children.
    Leaf,
    /// Descend, holding this cycle-guard key open while doing so.
    Open(PathBuf),
}

/// Common base traversal functionality shared by both walker implementations.
pub struct BaseTraversal<'a> {
    pub config: &'a WalkerConfig,
}

impl<'a> BaseTraversal<'a> {
    pub fn new(config: &'a WalkerConfig) -> Self {
        Self { config }
    }

    /// Classify the walk root, following symlinks. `None` when it does not
    /// exist or cannot be inspected.
    pub fn root_is_dir(&self, root: &Path) -> Option<bool> {
        fs::metadata(root).ok().map(|m| m.is_dir())
    }

    /// Decide whether to descend into a listed entry at `depth`.
    pub fn plan_entry(&self, entry: &CatalogEntry, depth: usize, state: &WalkState<'_>) -> Descent {
        if !entry.is_dir {
            return Descent::Leaf;
        }
        if entry.is_symlink && !self.config.expand_symlinks {
            return Descent::Leaf;
        }
        self.plan_dir(&entry.path, depth, state)
    }

    /// Decide whether to descend into the directory at `path`, sitting at
    /// `depth` below the root.
    pub fn plan_dir(&self, path: &Path, depth: usize, state: &WalkState<'_>) -> Descent {
        if !self.config.allows_descent(depth) {
            return Descent::Leaf;
        }
        let key = VisitedPathSet::key_for(path);
        if state.visited.contains(&key) {
            trace!(path = %path.display(), target = %key.display(), "cycle back to an open ancestor");
            return Descent::Leaf;
        }
        Descent::Open(key)
    }
}

/// Mutable state owned by a single walk.
pub struct WalkState<'w> {
    control: &'w WalkControl<'w>,
    visited: VisitedPathSet,
    processed: usize,
}

impl<'w> WalkState<'w> {
    pub fn new(control: &'w WalkControl<'w>) -> Self {
        Self {
            control,
            visited: VisitedPathSet::new(),
            processed: 0,
        }
    }

    /// Cancellation checkpoint.
    pub fn checkpoint(&self) -> Result<(), Cancelled> {
        if self.control.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Record one fully processed entry, reporting progress on every
    /// `PROGRESS_INTERVAL`th.
    pub fn entry_done(&mut self) {
        self.processed += 1;
        if self.processed % PROGRESS_INTERVAL == 0 {
            self.control.report_processed(self.processed);
        }
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Mark `key` as open until the returned guard is dropped.
    pub fn open(&mut self, key: PathBuf) -> OpenDirectory<'_, 'w> {
        self.visited.insert(key.clone());
        OpenDirectory { state: self, key }
    }
}

/// Scope guard keeping a directory on the cycle-guard stack.
///
/// Dereferences to the walk state so recursion continues through it; the
/// key is released on drop, including when a cancelled walk unwinds.
pub struct OpenDirectory<'s, 'w> {
    state: &'s mut WalkState<'w>,
    key: PathBuf,
}

impl<'w> Deref for OpenDirectory<'_, 'w> {
    type Target = WalkState<'w>;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl DerefMut for OpenDirectory<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl Drop for OpenDirectory<'_, '_> {
    fn drop(&mut self) {
        self.state.visited.remove(&self.key);
    }
}
