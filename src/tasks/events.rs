//! Messages posted from workers back to the coordinating thread

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use crate::error::TaskError;

/// Events produced by the background services.
#[derive(Debug)]
pub enum TaskEvent {
    /// Progress note from a running generation.
    Progress(String),
    /// The rendered tree.
    TreeCompleted(String),
    TreeFailed(TaskError),
    /// A save finished writing this file.
    SaveCompleted(PathBuf),
    SaveFailed(TaskError),
}

/// A trait that abstracts the posting of events to the coordinating thread.
/// This is "fire-and-forget" and doesn't return a result, simplifying its use.
pub trait EventProxy: Send + Sync + Clone + 'static {
    fn send_event(&self, event: TaskEvent);
}

impl EventProxy for Sender<TaskEvent> {
    fn send_event(&self, event: TaskEvent) {
        // A closed receiver means nobody waits for the result anymore.
        if let Err(e) = self.send(event) {
            tracing::debug!("dropping task event, receiver gone: {:?}", e.0);
        }
    }
}
