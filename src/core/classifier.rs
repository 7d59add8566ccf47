use crate::models::entry::{DirEntry, EntryKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    ZeroLengthFile,
    EmptyDirectory,
    Neither,
}

/// Decide what kind of candidate an entry is. Directory emptiness comes from
/// the enumerated child count, never from the size field.
pub fn classify(entry: &DirEntry) -> Classification {
    match entry.kind {
        EntryKind::File if entry.size == 0 => Classification::ZeroLengthFile,
        EntryKind::Directory if entry.child_count == Some(0) => Classification::EmptyDirectory,
        _ => Classification::Neither,
    }
}
