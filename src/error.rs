//! Error types shared by the walker, the renderers and the background tasks

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Marker returned when a cancellation checkpoint observed the cancel flag.
///
/// Recursive walks propagate it with `?` so the whole stack unwinds at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation cancelled")]
pub struct Cancelled;

/// Failure to persist a rendered tree.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("cannot create {path}: {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

impl SaveError {
    pub(crate) fn create(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SaveError::Create {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SaveError::Write {
            path: path.into(),
            source,
        }
    }
}

/// Outcome of a background job that did not complete normally.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The job observed cancellation. Never handed to an error callback.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("worker panicked: {0}")]
    Panicked(String),
}

impl TaskError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TaskError::Cancelled(_))
    }
}
