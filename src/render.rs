//! Walk-and-render entry point shared by the background services

use std::path::{Path, PathBuf};

use crate::error::Cancelled;
use crate::output::{OutputFormat, TextTree, render_tree};
use crate::tree::{StreamingWalker, TreeWalker, WalkControl, WalkerConfig};

/// Everything needed to render one directory snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub root: PathBuf,
    pub config: WalkerConfig,
    pub format: OutputFormat,
}

impl RenderRequest {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: WalkerConfig::default(),
            format: OutputFormat::default(),
        }
    }

    pub fn with_config(mut self, config: WalkerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Result of a walk as seen by callers. A missing root is a normal
/// `Rendered` message, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    Rendered(String),
    Cancelled,
}

impl WalkOutcome {
    pub fn into_result(self) -> Result<String, Cancelled> {
        match self {
            WalkOutcome::Rendered(text) => Ok(text),
            WalkOutcome::Cancelled => Err(Cancelled),
        }
    }
}

/// Text shown in place of a tree when the root does not exist.
pub fn missing_path_message(root: &Path) -> String {
    format!("Path does not exist: {}", root.display())
}

/// Walk `request.root` and render it.
///
/// Text is streamed into a single buffer without materializing nodes;
/// JSON and XML build the node tree first and serialize it.
pub fn render(request: &RenderRequest, control: &WalkControl<'_>) -> WalkOutcome {
    let rendered = match request.format {
        OutputFormat::Text => {
            let mut out = TextTree::new();
            let walked =
                StreamingWalker::new(request.config).walk_streaming(&request.root, control, &mut out);
            walked.map(|counts| counts.map(|_| out.into_string()))
        }
        format => TreeWalker::new(request.config)
            .walk(&request.root, control)
            .map(|tree| tree.map(|tree| render_tree(&tree, format))),
    };

    match rendered {
        Ok(Some(text)) => WalkOutcome::Rendered(text),
        Ok(None) => WalkOutcome::Rendered(missing_path_message(&request.root)),
        Err(Cancelled) => WalkOutcome::Cancelled,
    }
}
