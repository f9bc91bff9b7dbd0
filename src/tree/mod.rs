//! Directory tree walking logic
//!
//! This module provides tree walking capabilities for snapshotting directory structures.
//! It supports two main modes:
//!
//! - `TreeWalker`: Builds full tree in memory, required for JSON and XML output
//! - `StreamingWalker`: Streams output directly, uses O(depth) memory for text output
//!
//! Both walkers list directories first, then files, each group ordered by
//! case-insensitive name; they stop at the configured depth, never follow a
//! symlink back into an ancestor that is still open, and poll the caller's
//! cancellation predicate at every checkpoint.

mod catalog;
mod config;
mod control;
mod node;
mod streaming;
mod traversal;
mod visited;
mod walker;

// Re-export public types
pub use catalog::{CatalogEntry, display_name, read_entries, sort_entries};
pub use config::WalkerConfig;
pub use control::{PROGRESS_INTERVAL, WalkControl};
pub use node::{NodeKind, TreeNode};
pub use streaming::{StreamingOutput, StreamingWalker};
pub use visited::VisitedPathSet;
pub use walker::TreeWalker;
