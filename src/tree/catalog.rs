//! Classification and ordering of directory entries

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

/// A directory entry classified for walking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub path: PathBuf,
    /// Directory classification. For symlinks this is the target's type;
    /// dangling links count as files.
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl CatalogEntry {
    fn classify(entry: &fs::DirEntry) -> Option<Self> {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(err) => {
                trace!(path = %path.display(), %err, "skipping entry with unreadable type");
                return None;
            }
        };
        let is_symlink = file_type.is_symlink();
        let is_dir = if is_symlink {
            fs::metadata(&path).is_ok_and(|m| m.is_dir())
        } else {
            file_type.is_dir()
        };

        Some(Self {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
            is_dir,
            is_symlink,
        })
    }
}

/// Name shown for a walk root: the last component, or the whole path when
/// there is none (`/`, `C:\`).
pub fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}

/// List a directory in rendering order.
///
/// Unreadable directories yield no entries and an iteration error keeps
/// whatever was collected before it. Nothing is reported to the caller.
pub fn read_entries(dir: &Path) -> Vec<CatalogEntry> {
    let iter = match fs::read_dir(dir) {
        Ok(iter) => iter,
        Err(err) => {
            trace!(path = %dir.display(), %err, "cannot list directory");
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    for entry in iter {
        match entry {
            Ok(entry) => entries.extend(CatalogEntry::classify(&entry)),
            Err(err) => {
                trace!(path = %dir.display(), %err, "directory listing interrupted");
                break;
            }
        }
    }

    sort_entries(&mut entries);
    entries
}

/// Directories first, then case-insensitive name order.
///
/// Case folding is `str::to_lowercase` (locale independent Unicode
/// lowering). Names equal after folding fall back to the raw name so the
/// order stays total.
pub fn sort_entries(entries: &mut [CatalogEntry]) {
    entries.sort_by_cached_key(|e| (!e.is_dir, e.name.to_lowercase(), e.name.clone()));
}
