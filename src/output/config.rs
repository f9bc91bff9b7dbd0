//! Output format selection

use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// Encoding of a rendered tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented ASCII-art text with CRLF line endings
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// XML with a UTF-8 prolog
    Xml,
}

impl OutputFormat {
    /// Pick the format from a destination file's extension. Unknown or
    /// missing extensions mean text.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => OutputFormat::Json,
            Some("xml") => OutputFormat::Xml,
            _ => OutputFormat::Text,
        }
    }

    /// File extension written for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
        }
    }

    /// Append this format's extension unless `path` already ends with it.
    /// An existing different extension is kept (`tree.txt` -> `tree.txt.json`).
    pub fn ensure_extension(self, path: PathBuf) -> PathBuf {
        let has_ext = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case(self.extension()));
        if has_ext {
            return path;
        }
        let mut name = path.into_os_string();
        name.push(".");
        name.push(self.extension());
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("out.json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("out.XML")), OutputFormat::Xml);
        assert_eq!(OutputFormat::from_path(Path::new("out.txt")), OutputFormat::Text);
        assert_eq!(OutputFormat::from_path(Path::new("out")), OutputFormat::Text);
    }

    #[test]
    fn test_ensure_extension_appends_when_missing() {
        assert_eq!(
            OutputFormat::Json.ensure_extension(PathBuf::from("tree")),
            PathBuf::from("tree.json")
        );
        assert_eq!(
            OutputFormat::Xml.ensure_extension(PathBuf::from("tree.txt")),
            PathBuf::from("tree.txt.xml")
        );
    }

    #[test]
    fn test_ensure_extension_keeps_matching() {
        assert_eq!(
            OutputFormat::Text.ensure_extension(PathBuf::from("dir/tree.TXT")),
            PathBuf::from("dir/tree.TXT")
        );
    }
}
