//! Cancellable background work
//!
//! - `runner` - generic single-slot worker (`TaskRunner`)
//! - `generate` - tree generation service
//! - `save` - file save service
//! - `events` - marshaling worker results back to the caller's thread

mod events;
mod generate;
mod runner;
mod save;

pub use events::{EventProxy, TaskEvent};
pub use generate::{ProgressSink, TreeGenerationService};
pub use runner::{CancellationToken, TaskRunner};
pub use save::{FileSaveService, write_utf8_file};
