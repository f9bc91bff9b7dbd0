//! Background tree generation

use std::sync::Arc;

use crate::error::TaskError;
use crate::render::{RenderRequest, render};
use crate::tree::WalkControl;

use super::runner::TaskRunner;

/// Progress callback shared with the worker thread.
pub type ProgressSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Renders trees off the calling thread, one at a time.
///
/// Starting a new generation cancels the one in flight, so "regenerate with
/// another depth" and "cancel" share a code path.
#[derive(Debug)]
pub struct TreeGenerationService {
    runner: TaskRunner,
}

impl TreeGenerationService {
    pub fn new() -> Self {
        Self {
            runner: TaskRunner::new("tree-generation"),
        }
    }

    /// Render `request` in the background.
    ///
    /// `on_completed` receives the rendered text, including the "path does
    /// not exist" message. Callbacks run on the worker thread.
    pub fn start<C, E>(
        &mut self,
        request: RenderRequest,
        on_completed: C,
        on_error: E,
        on_progress: Option<ProgressSink>,
    ) where
        C: FnOnce(String) + Send + 'static,
        E: FnOnce(TaskError) + Send + 'static,
    {
        self.runner.start(
            move |token| {
                let mut control = WalkControl::new().with_cancel(|| token.is_cancelled());
                if let Some(sink) = &on_progress {
                    control = control.with_progress(|msg| sink(msg));
                }
                Ok(render(&request, &control).into_result()?)
            },
            on_completed,
            on_error,
        );
    }

    pub fn cancel(&mut self) {
        self.runner.cancel();
    }

    /// Block until the current generation has finished and its callback ran.
    pub fn wait(&mut self) {
        self.runner.wait();
    }

    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }
}

impl Default for TreeGenerationService {
    fn default() -> Self {
        Self::new()
    }
}
