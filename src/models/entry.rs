use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Other,
}

impl EntryKind {
    pub fn from_file_type(file_type: std::fs::FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// A single visited node. Lives only for the duration of one visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub kind: EntryKind,
    /// Number of children enumerated when the directory was inspected.
    /// Always `None` for non-directories and for directories not yet listed.
    pub child_count: Option<usize>,
}

impl DirEntry {
    pub fn from_file(path: PathBuf, name: String, size: u64) -> Self {
        Self {
            path,
            name,
            size,
            kind: EntryKind::File,
            child_count: None,
        }
    }

    pub fn from_directory(path: PathBuf, name: String, child_count: Option<usize>) -> Self {
        Self {
            path,
            name,
            size: 0,
            kind: EntryKind::Directory,
            child_count,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Final path component, falling back to the whole path for roots like `/`.
pub fn entry_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
