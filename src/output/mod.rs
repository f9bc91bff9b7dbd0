//! Tree formatting
//!
//! This module renders walked trees in the three supported encodings:
//! - Indented text (streamed by `StreamingWalker` or rendered from a tree)
//! - JSON
//! - XML
//!
//! # Module Structure
//!
//! - `config` - Output format selection
//! - `text` - Text sink and renderer
//! - `json` - JSON output
//! - `xml` - XML output

mod config;
mod json;
mod text;
mod xml;

use crate::tree::TreeNode;

// Re-export public types and functions
pub use config::OutputFormat;
pub use json::render_json;
pub use text::{TextTree, child_prefix, render_text};
pub use xml::{escape_attribute, render_xml};

/// Render a node tree in the requested format. Pure; performs no I/O.
pub fn render_tree(root: &TreeNode, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(root),
        OutputFormat::Json => render_json(root),
        OutputFormat::Xml => render_xml(root),
    }
}
