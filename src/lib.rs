//! dirtree - Snapshot a directory hierarchy as text, JSON or XML

pub mod error;
pub mod output;
pub mod render;
pub mod tasks;
pub mod tree;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use error::{Cancelled, SaveError, TaskError};
pub use output::{OutputFormat, render_tree};
pub use render::{RenderRequest, WalkOutcome, render};
pub use tasks::{
    CancellationToken, EventProxy, FileSaveService, ProgressSink, TaskEvent, TaskRunner,
    TreeGenerationService,
};
pub use tree::{NodeKind, StreamingOutput, StreamingWalker, TreeNode, TreeWalker, WalkControl, WalkerConfig};
