//! XML output formatting

use std::borrow::Cow;

use crate::tree::TreeNode;

const PROLOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "  ";

/// Render a node tree as XML: `<directory name="...">` elements wrapping
/// their children and self-closing `<file name="..."/>` leaves.
pub fn render_xml(root: &TreeNode) -> String {
    let mut out = String::with_capacity(PROLOG.len() + 64 * root.node_count());
    out.push_str(PROLOG);
    out.push('\n');
    write_element(root, 0, &mut out);
    out
}

fn write_element(node: &TreeNode, level: usize, out: &mut String) {
    for _ in 0..level {
        out.push_str(INDENT);
    }

    if !node.is_dir() {
        out.push_str("<file name=\"");
        out.push_str(&escape_attribute(node.name()));
        out.push_str("\"/>\n");
        return;
    }

    out.push_str("<directory name=\"");
    out.push_str(&escape_attribute(node.name()));
    out.push_str("\">");

    if node.children.is_empty() {
        out.push_str("</directory>\n");
        return;
    }

    out.push('\n');
    for child in &node.children {
        write_element(child, level + 1, out);
    }
    for _ in 0..level {
        out.push_str(INDENT);
    }
    out.push_str("</directory>\n");
}

/// Escape `& < > " '` for use inside a double-quoted attribute.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute("plain.txt"), "plain.txt");
        assert_eq!(
            escape_attribute(r#"a&b<c>d"e'f"#),
            "a&amp;b&lt;c&gt;d&quot;e&apos;f"
        );
    }

    #[test]
    fn test_render_layout() {
        let root = TreeNode::dir(
            "proj",
            vec![
                TreeNode::dir("empty", vec![]),
                TreeNode::dir("src", vec![TreeNode::file("main.rs")]),
                TreeNode::file("R&D.md"),
            ],
        );
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<directory name=\"proj\">\n",
            "  <directory name=\"empty\"></directory>\n",
            "  <directory name=\"src\">\n",
            "    <file name=\"main.rs\"/>\n",
            "  </directory>\n",
            "  <file name=\"R&amp;D.md\"/>\n",
            "</directory>\n",
        );
        assert_eq!(render_xml(&root), expected);
    }

    #[test]
    fn test_file_root() {
        assert_eq!(
            render_xml(&TreeNode::file("solo")),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<file name=\"solo\"/>\n"
        );
    }
}
