use std::path::PathBuf;
use std::time::Duration;

use crate::error::ScanError;

/// Outcome of one traversal.
pub type ScanResult = Result<ScanReport, ScanError>;

#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Object type this pass ran for; `None` for the unfiltered pass.
    pub filter: Option<String>,
    pub entries_visited: usize,
    pub files_deleted: usize,
    pub dirs_pruned: usize,
    /// Names enumerated by a non-recursive pass.
    pub listed: Vec<String>,
    pub errors: Vec<EntryError>,
    pub scan_duration: Duration,
}

impl ScanReport {
    pub fn removed(&self) -> usize {
        self.files_deleted + self.dirs_pruned
    }
}

/// A non-fatal failure on a single entry. Recorded, never aborts the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryError {
    pub path: PathBuf,
    pub kind: EntryErrorKind,
    pub message: String,
}

impl EntryError {
    pub fn from_io(path: PathBuf, err: &std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::PermissionDenied => EntryErrorKind::PermissionDenied,
            std::io::ErrorKind::NotFound => EntryErrorKind::NotFound,
            _ => EntryErrorKind::IoError,
        };
        Self {
            path,
            kind,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryErrorKind {
    PermissionDenied,
    NotFound,
    IoError,
}

/// Result of one launched task, tagged with the filter it ran for.
#[derive(Debug)]
pub struct TaskOutcome {
    pub filter: Option<String>,
    pub result: ScanResult,
}
