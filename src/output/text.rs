//! Indented ASCII-art text rendering
//!
//! `TextTree` is both the sink `StreamingWalker` writes into and the
//! backend of [`render_text`], so streamed and buffered renderings are
//! byte-identical.

use crate::tree::{StreamingOutput, TreeNode};

const BRANCH: &str = "├── ";
const LAST: &str = "└── ";
const VERTICAL: &str = "│   ";
const SPACE: &str = "    ";
const LINE_END: &str = "\r\n";

/// Calculate the prefix for the children of an entry.
pub fn child_prefix(prefix: &str, is_last: bool) -> String {
    let mut next = String::with_capacity(prefix.len() + VERTICAL.len());
    next.push_str(prefix);
    next.push_str(if is_last { SPACE } else { VERTICAL });
    next
}

/// Text buffer accumulating one rendered line per node.
#[derive(Debug, Default)]
pub struct TextTree {
    buf: String,
}

impl TextTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

impl StreamingOutput for TextTree {
    fn output_node(&mut self, name: &str, is_dir: bool, is_last: bool, prefix: &str, is_root: bool) {
        if is_root {
            self.buf.push_str(name);
            self.buf.push('/');
        } else {
            self.buf.push_str(prefix);
            self.buf.push_str(if is_last { LAST } else { BRANCH });
            self.buf.push_str(name);
            if is_dir {
                self.buf.push('/');
            }
        }
        self.buf.push_str(LINE_END);
    }
}

/// Render a node tree as indented text.
pub fn render_text(root: &TreeNode) -> String {
    let mut out = TextTree::new();
    out.output_node(root.name(), root.is_dir(), true, "", true);
    write_children(&root.children, "", &mut out);
    out.into_string()
}

fn write_children(children: &[TreeNode], prefix: &str, out: &mut TextTree) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        out.output_node(child.name(), child.is_dir(), is_last, prefix, false);
        if !child.children.is_empty() {
            write_children(&child.children, &child_prefix(prefix, is_last), out);
        }
    }
}
