//! Persisting rendered trees

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Cancelled, SaveError, TaskError};
use crate::render::{RenderRequest, render};
use crate::tree::WalkControl;

use super::runner::TaskRunner;

/// Writes rendered trees to disk, either from text already on hand or by
/// rendering a request in the background first.
#[derive(Debug)]
pub struct FileSaveService {
    runner: TaskRunner,
}

impl FileSaveService {
    pub fn new() -> Self {
        Self {
            runner: TaskRunner::new("file-save"),
        }
    }

    /// Write already-rendered text on the calling thread.
    pub fn save_text_sync(&self, path: &Path, content: &str) -> Result<(), SaveError> {
        write_utf8_file(path, content)
    }

    /// Render `request` and write it to `path` in the background.
    ///
    /// A cancellation that arrives after rendering but before writing
    /// skips the write. `on_completed` receives the written path.
    pub fn save_tree_async<C, E>(
        &mut self,
        path: PathBuf,
        request: RenderRequest,
        on_completed: C,
        on_error: E,
    ) where
        C: FnOnce(PathBuf) + Send + 'static,
        E: FnOnce(TaskError) + Send + 'static,
    {
        self.runner.start(
            move |token| {
                let control = WalkControl::new().with_cancel(|| token.is_cancelled());
                let content = render(&request, &control).into_result()?;
                if token.is_cancelled() {
                    return Err(Cancelled.into());
                }
                write_utf8_file(&path, &content)?;
                Ok(path)
            },
            on_completed,
            on_error,
        );
    }

    pub fn cancel(&mut self) {
        self.runner.cancel();
    }

    pub fn wait(&mut self) {
        self.runner.wait();
    }

    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }
}

impl Default for FileSaveService {
    fn default() -> Self {
        Self::new()
    }
}

/// Create or truncate `path` and write `content` as UTF-8 without a BOM.
pub fn write_utf8_file(path: &Path, content: &str) -> Result<(), SaveError> {
    let mut file = File::create(path).map_err(|e| SaveError::create(path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| SaveError::write(path, e))?;
    info!(path = %path.display(), bytes = content.len(), "tree saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_write_utf8_without_bom() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("tree.txt");
        write_utf8_file(&path, "корень/\r\n└── файл\r\n").unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(!bytes.starts_with(&[0xEF, 0xBB, 0xBF]));
        assert_eq!(String::from_utf8(bytes).unwrap(), "корень/\r\n└── файл\r\n");
    }

    #[test]
    fn test_write_truncates_existing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("tree.txt");
        fs::write(&path, "a much longer previous content").unwrap();
        write_utf8_file(&path, "short").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn test_create_failure_names_path() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("missing-dir").join("tree.txt");
        let err = write_utf8_file(&path, "x").unwrap_err();
        assert!(matches!(err, SaveError::Create { .. }));
        assert!(err.to_string().contains("tree.txt"));
    }
}
