use std::path::{Path, PathBuf};

use dashmap::DashSet;

use crate::config::settings::ScanConfig;
use crate::models::entry::{entry_name, DirEntry};
use crate::models::scan_result::{EntryError, EntryErrorKind};

use super::classifier::Classification;
use super::events::{Event, EventSender};
use super::inspector;
use super::progress::ScanStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Deleted,
    Pruned,
    Skipped,
    Failed(EntryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    File,
    Folder,
}

/// Applies delete/prune actions for one traversal.
///
/// Paths are claimed in a set shared with every concurrent traversal before
/// they are removed, so each path is deleted and reported at most once.
pub struct ActionExecutor<'a> {
    config: &'a ScanConfig,
    claimed: &'a DashSet<PathBuf>,
    event_tx: &'a EventSender,
    stats: &'a ScanStats,
    errors: Vec<EntryError>,
}

impl<'a> ActionExecutor<'a> {
    pub fn new(
        config: &'a ScanConfig,
        claimed: &'a DashSet<PathBuf>,
        event_tx: &'a EventSender,
        stats: &'a ScanStats,
    ) -> Self {
        Self {
            config,
            claimed,
            event_tx,
            stats,
            errors: Vec::new(),
        }
    }

    pub fn apply(&mut self, entry: &DirEntry, classification: Classification) -> ActionResult {
        let target = match classification {
            Classification::ZeroLengthFile if self.config.delete_zero_files => Target::File,
            Classification::EmptyDirectory if self.config.prune_empty_dirs => Target::Folder,
            _ => return ActionResult::Skipped,
        };

        let result = self.remove(&entry.path, &entry.name, target);
        if matches!(result, ActionResult::Deleted | ActionResult::Pruned)
            && self.config.prune_empty_dirs
        {
            self.prune_ancestors(&entry.path);
        }
        result
    }

    /// Record a failure that happened outside of a removal.
    pub fn record_error(&mut self, error: EntryError) {
        if error.kind == EntryErrorKind::NotFound {
            tracing::debug!("Entry vanished during scan: {}", error.path.display());
            return;
        }
        tracing::warn!("{}: {}", error.path.display(), error.message);
        let _ = self.event_tx.send(Event::EntryFailed {
            error: error.clone(),
        });
        self.errors.push(error);
    }

    pub fn into_errors(self) -> Vec<EntryError> {
        self.errors
    }

    fn is_root(&self, path: &Path) -> bool {
        path == self.config.root.as_path()
    }

    fn remove(&mut self, path: &Path, name: &str, target: Target) -> ActionResult {
        if self.is_root(path) {
            return ActionResult::Skipped;
        }
        if !self.claimed.insert(path.to_path_buf()) {
            tracing::debug!("Already claimed by another scan: {}", path.display());
            return ActionResult::Skipped;
        }

        let removal = match target {
            Target::File => std::fs::remove_file(path),
            Target::Folder => std::fs::remove_dir(path),
        };

        match removal {
            Ok(()) => {
                let path = path.to_path_buf();
                let name = name.to_string();
                match target {
                    Target::File => {
                        tracing::debug!("Deleted zero-length file {}", path.display());
                        self.stats.increment_files_deleted();
                        let _ = self.event_tx.send(Event::FileDeleted { path, name });
                        ActionResult::Deleted
                    }
                    Target::Folder => {
                        tracing::debug!("Pruned empty folder {}", path.display());
                        self.stats.increment_dirs_pruned();
                        let _ = self.event_tx.send(Event::FolderPruned { path, name });
                        ActionResult::Pruned
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Already removed: {}", path.display());
                ActionResult::Skipped
            }
            Err(e) => {
                let error = EntryError::from_io(path.to_path_buf(), &e);
                self.record_error(error.clone());
                ActionResult::Failed(error)
            }
        }
    }

    /// Walk up from a removed entry, pruning every ancestor it left empty.
    /// Stops at the root, which is never removed.
    fn prune_ancestors(&mut self, removed: &Path) {
        let mut current = removed.parent().map(Path::to_path_buf);

        while let Some(dir) = current {
            if self.is_root(&dir) || !dir.starts_with(&self.config.root) {
                break;
            }
            match inspector::is_empty_dir(&dir) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    self.record_error(EntryError::from_io(dir, &e));
                    break;
                }
            }
            let name = entry_name(&dir);
            if self.remove(&dir, &name, Target::Folder) != ActionResult::Pruned {
                break;
            }
            current = dir.parent().map(Path::to_path_buf);
        }
    }
}
