use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::models::scan_result::EntryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Scan state
    ScanStarted { filter: Option<String>, path: PathBuf },
    ScanCompleted { filter: Option<String>, removed: usize, duration_ms: u64 },

    // Actions
    FileDeleted { path: PathBuf, name: String },
    FolderPruned { path: PathBuf, name: String },
    EntryFailed { error: EntryError },

    // Non-recursive listing
    Listed { filter: Option<String>, name: String },
}

pub type EventSender = mpsc::UnboundedSender<Event>;
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

pub fn create_event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
