//! StreamingWalker - streams output without building full tree in memory

use std::path::Path;

use tracing::debug;

use crate::error::Cancelled;
use crate::output::child_prefix;

use super::catalog::{display_name, read_entries};
use super::config::WalkerConfig;
use super::control::WalkControl;
use super::traversal::{BaseTraversal, Descent, WalkState};

/// Sink for streaming output - receives one call per rendered line.
pub trait StreamingOutput {
    /// `prefix` is the indentation inherited from the ancestors; the sink
    /// adds the connector itself. The root arrives with `is_root` set and
    /// an empty prefix.
    fn output_node(&mut self, name: &str, is_dir: bool, is_last: bool, prefix: &str, is_root: bool);
}

/// Streaming tree walker that outputs directly without building tree in memory.
/// Uses O(depth) memory instead of O(files) for the tree structure.
pub struct StreamingWalker {
    config: WalkerConfig,
}

impl StreamingWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Walk and stream output - returns (dir_count, file_count), not
    /// counting the root.
    ///
    /// `Ok(None)` means the root does not exist. On `Err(Cancelled)` the
    /// sink holds a partial rendering that callers must discard.
    pub fn walk_streaming<O: StreamingOutput>(
        &self,
        root: &Path,
        control: &WalkControl<'_>,
        output: &mut O,
    ) -> Result<Option<(usize, usize)>, Cancelled> {
        let traversal = BaseTraversal::new(&self.config);
        let Some(root_is_dir) = traversal.root_is_dir(root) else {
            return Ok(None);
        };

        let mut state = WalkState::new(control);
        state.checkpoint()?;

        output.output_node(&display_name(root), root_is_dir, true, "", true);
        if !root_is_dir {
            return Ok(Some((0, 0)));
        }

        let counts = match traversal.plan_dir(root, 0, &state) {
            Descent::Leaf => (0, 0),
            Descent::Open(key) => {
                let mut open = state.open(key);
                self.walk_dir_streaming(&traversal, root, 0, "", &mut open, output)?
            }
        };
        debug!(
            root = %root.display(),
            dirs = counts.0,
            files = counts.1,
            processed = state.processed(),
            "tree streamed"
        );

        Ok(Some(counts))
    }

    fn walk_dir_streaming<O: StreamingOutput>(
        &self,
        traversal: &BaseTraversal<'_>,
        path: &Path,
        depth: usize,
        prefix: &str,
        state: &mut WalkState<'_>,
        output: &mut O,
    ) -> Result<(usize, usize), Cancelled> {
        state.checkpoint()?;

        let entries = read_entries(path);
        let total = entries.len();

        let mut dir_count = 0usize;
        let mut file_count = 0usize;

        for (i, entry) in entries.into_iter().enumerate() {
            state.checkpoint()?;

            let is_last = i + 1 == total;
            output.output_node(&entry.name, entry.is_dir, is_last, prefix, false);

            if entry.is_dir {
                dir_count += 1;
                if let Descent::Open(key) = traversal.plan_entry(&entry, depth + 1, state) {
                    let new_prefix = child_prefix(prefix, is_last);
                    let mut open = state.open(key);
                    let (d, f) = self.walk_dir_streaming(
                        traversal,
                        &entry.path,
                        depth + 1,
                        &new_prefix,
                        &mut open,
                        output,
                    )?;
                    dir_count += d;
                    file_count += f;
                }
            } else {
                file_count += 1;
            }

            state.entry_done();
        }

        Ok((dir_count, file_count))
    }
}
