//! Single-slot cancellable background worker

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::error::TaskError;

/// Shared cancellation flag handed to a job.
///
/// Each `start` gets a fresh token; the `Arc` keeps the flag alive for as
/// long as the worker can read it.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Runs at most one job at a time on a dedicated thread.
///
/// `start` while a job is running cancels it and waits for the worker to
/// exit before launching the new one. At most one of the completion and
/// error callbacks fires per `start`, on the worker thread, and neither
/// fires once the job's token has been cancelled. Dropping the runner
/// cancels and joins.
#[derive(Debug)]
pub struct TaskRunner {
    name: &'static str,
    worker: Option<JoinHandle<()>>,
    token: CancellationToken,
    running: Arc<AtomicBool>,
}

impl TaskRunner {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            worker: None,
            token: CancellationToken::new(),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn start<T, J, C, E>(&mut self, job: J, on_completed: C, on_error: E)
    where
        T: Send + 'static,
        J: FnOnce(&CancellationToken) -> Result<T, TaskError> + Send + 'static,
        C: FnOnce(T) + Send + 'static,
        E: FnOnce(TaskError) + Send + 'static,
    {
        self.cancel();

        let token = CancellationToken::new();
        self.token = token.clone();
        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let name = self.name;
        debug!(task = name, "starting worker");

        self.worker = Some(thread::spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| job(&token)))
                .unwrap_or_else(|payload| Err(TaskError::Panicked(panic_message(payload.as_ref()))));

            if token.is_cancelled() {
                debug!(task = name, "discarding result of cancelled worker");
            } else {
                match outcome {
                    Ok(value) => on_completed(value),
                    Err(err) if err.is_cancelled() => {}
                    Err(err) => {
                        if let TaskError::Panicked(msg) = &err {
                            warn!(task = name, "worker panicked: {msg}");
                        }
                        on_error(err)
                    }
                }
            }

            running.store(false, Ordering::SeqCst);
        }));
    }

    /// Request cancellation and wait for the worker to exit. Idempotent.
    pub fn cancel(&mut self) {
        self.token.cancel();
        self.join();
    }

    /// Wait for the current worker to finish without cancelling it.
    pub fn wait(&mut self) {
        self.join();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            debug!(task = self.name, "joining worker");
            if worker.join().is_err() {
                warn!(task = self.name, "worker thread panicked in a callback");
            }
        }
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Drop for TaskRunner {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
