use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ScanError;
use crate::models::entry::{entry_name, DirEntry, EntryKind};
use crate::models::scan_result::EntryError;

/// Children of one directory plus the per-child failures hit while reading it.
#[derive(Debug, Default)]
pub struct Listing {
    pub entries: Vec<DirEntry>,
    pub errors: Vec<EntryError>,
}

impl Listing {
    /// Every name the directory returned, including ones that failed to stat.
    pub fn child_count(&self) -> usize {
        self.entries.len() + self.errors.len()
    }
}

/// Stat a single path without following symlinks.
pub fn inspect(path: &Path) -> std::io::Result<DirEntry> {
    let metadata = std::fs::symlink_metadata(path)?;
    Ok(DirEntry {
        path: path.to_path_buf(),
        name: entry_name(path),
        size: metadata.len(),
        kind: EntryKind::from_file_type(metadata.file_type()),
        child_count: None,
    })
}

/// Stat the walk root, following a symlink so a linked root directory is
/// walked like a real one. Nothing below the root is ever followed.
pub fn inspect_root(path: &Path) -> std::io::Result<DirEntry> {
    let metadata = std::fs::metadata(path)?;
    Ok(DirEntry {
        path: path.to_path_buf(),
        name: entry_name(path),
        size: metadata.len(),
        kind: EntryKind::from_file_type(metadata.file_type()),
        child_count: None,
    })
}

/// Read all entries and their metadata from a directory in one call.
/// Fails only if the directory itself can't be read.
pub fn list_children(dir_path: &Path) -> std::io::Result<Listing> {
    let mut listing = Listing::default();

    for entry_result in std::fs::read_dir(dir_path)? {
        match entry_result {
            Ok(entry) => {
                let entry_path = entry.path();
                match inspect(&entry_path) {
                    Ok(child) => listing.entries.push(child),
                    Err(e) => listing.errors.push(EntryError::from_io(entry_path, &e)),
                }
            }
            Err(e) => listing
                .errors
                .push(EntryError::from_io(dir_path.to_path_buf(), &e)),
        }
    }

    listing.entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(listing)
}

pub fn is_empty_dir(path: &Path) -> std::io::Result<bool> {
    Ok(std::fs::read_dir(path)?.next().is_none())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    /// The visitor deleted the entry; nothing below it is walked.
    Removed,
}

pub trait Visitor {
    /// Called once per node in pre-order. `depth` is 0 for the root.
    fn visit(&mut self, entry: &DirEntry, depth: usize) -> Result<Visit, ScanError>;

    /// Called for failures below the root that the walk steps over,
    /// including entries that vanished because another scan deleted them.
    fn entry_error(&mut self, error: EntryError);
}

/// Depth-first, pre-order walk of `root` and everything under it.
///
/// A directory is listed before it is visited so the visitor sees its child
/// count. Failing to list the root aborts the walk with `TraversalError`;
/// failures further down are handed to the visitor and skipped.
pub fn walk<V: Visitor>(root: &Path, cancel: &AtomicBool, visitor: &mut V) -> Result<(), ScanError> {
    let root_entry = inspect_root(root).map_err(|source| ScanError::TraversalError {
        path: root.to_path_buf(),
        source,
    })?;

    let mut stack = vec![(root_entry, 0usize)];

    while let Some((mut entry, depth)) = stack.pop() {
        if cancel.load(Ordering::Relaxed) {
            return Err(ScanError::Cancelled);
        }

        let mut children = Vec::new();
        if entry.is_dir() {
            match list_children(&entry.path) {
                Ok(listing) => {
                    entry.child_count = Some(listing.child_count());
                    for error in listing.errors {
                        visitor.entry_error(error);
                    }
                    children = listing.entries;
                }
                Err(source) if depth == 0 => {
                    return Err(ScanError::TraversalError {
                        path: entry.path,
                        source,
                    });
                }
                Err(e) => {
                    let vanished = e.kind() == std::io::ErrorKind::NotFound;
                    visitor.entry_error(EntryError::from_io(entry.path.clone(), &e));
                    if vanished {
                        continue;
                    }
                }
            }
        }

        if visitor.visit(&entry, depth)? == Visit::Removed {
            continue;
        }

        // Reverse so the first child by name is popped first.
        for child in children.into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    Ok(())
}
