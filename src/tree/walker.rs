//! TreeWalker - builds full tree in memory for JSON and XML output

use std::path::Path;

use tracing::debug;

use crate::error::Cancelled;

use super::catalog::{display_name, read_entries};
use super::config::WalkerConfig;
use super::control::WalkControl;
use super::node::TreeNode;
use super::traversal::{BaseTraversal, Descent, WalkState};

/// Tree walker that builds the full tree in memory.
/// Required for JSON and XML serialization.
/// For text output, use StreamingWalker instead.
pub struct TreeWalker {
    config: WalkerConfig,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Walk `root` into a node tree.
    ///
    /// Returns `Ok(None)` when the root does not exist and `Err(Cancelled)`
    /// as soon as a checkpoint sees the cancel flag.
    pub fn walk(&self, root: &Path, control: &WalkControl<'_>) -> Result<Option<TreeNode>, Cancelled> {
        let traversal = BaseTraversal::new(&self.config);
        let Some(root_is_dir) = traversal.root_is_dir(root) else {
            return Ok(None);
        };

        let mut state = WalkState::new(control);
        state.checkpoint()?;

        let name = display_name(root);
        if !root_is_dir {
            return Ok(Some(TreeNode::file(name)));
        }

        let children = match traversal.plan_dir(root, 0, &state) {
            Descent::Leaf => Vec::new(),
            Descent::Open(key) => {
                let mut open = state.open(key);
                self.walk_dir(&traversal, root, 0, &mut open)?
            }
        };
        debug!(root = %root.display(), processed = state.processed(), "tree built");

        Ok(Some(TreeNode::dir(name, children)))
    }

    fn walk_dir(
        &self,
        traversal: &BaseTraversal<'_>,
        path: &Path,
        depth: usize,
        state: &mut WalkState<'_>,
    ) -> Result<Vec<TreeNode>, Cancelled> {
        state.checkpoint()?;

        let entries = read_entries(path);
        let mut children = Vec::with_capacity(entries.len());

        for entry in entries {
            state.checkpoint()?;

            let node = if entry.is_dir {
                let grandchildren = match traversal.plan_entry(&entry, depth + 1, state) {
                    Descent::Leaf => Vec::new(),
                    Descent::Open(key) => {
                        let mut open = state.open(key);
                        self.walk_dir(traversal, &entry.path, depth + 1, &mut open)?
                    }
                };
                TreeNode::dir(entry.name, grandchildren)
            } else {
                TreeNode::file(entry.name)
            };

            children.push(node);
            state.entry_done();
        }

        Ok(children)
    }
}
