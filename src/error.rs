use std::path::PathBuf;

use thiserror::Error;

/// Fatal failure of a single traversal task.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Folder {} not found.", display_upper(.path))]
    RootNotFound { path: PathBuf },

    #[error("{} is a file, not a folder.", display_upper(.path))]
    RootNotDirectory { path: PathBuf },

    #[error("traversal of {} aborted: {source}", .path.display())]
    TraversalError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid object type pattern '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("scan cancelled after a sibling scan failed")]
    Cancelled,

    #[error("scan task for {filter} failed: {message}")]
    TaskFailed { filter: String, message: String },
}

impl ScanError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ScanError::RootNotFound { .. } => ExitCode::FolderNotFound,
            ScanError::RootNotDirectory { .. } => ExitCode::FileNotFound,
            ScanError::TraversalError { .. } => ExitCode::TraversalError,
            ScanError::InvalidFilter { .. }
            | ScanError::Cancelled
            | ScanError::TaskFailed { .. } => ExitCode::Internal,
        }
    }
}

/// Process exit codes, one per failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    FileNotFound = 1,
    TraversalError = 2,
    Internal = 3,
    FolderNotFound = 4,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

fn display_upper(path: &std::path::Path) -> String {
    path.to_string_lossy().to_uppercase()
}
