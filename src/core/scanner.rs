use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashSet;
use tokio::sync::Semaphore;

use crate::config::settings::ScanConfig;
use crate::error::ScanError;
use crate::models::entry::{DirEntry, EntryKind};
use crate::models::scan_result::{EntryError, ScanReport, ScanResult};

use super::classifier::{classify, Classification};
use super::events::{Event, EventSender};
use super::executor::{ActionExecutor, ActionResult};
use super::filter::ObjectFilter;
use super::inspector::{self, Visit, Visitor};
use super::progress::ScanStats;

/// Runs one traversal per call. Clones share the claim set, the cancel flag
/// and the I/O semaphore, so concurrent scans of the same root cooperate.
#[derive(Clone)]
pub struct Scanner {
    config: Arc<ScanConfig>,
    event_tx: EventSender,
    claimed: Arc<DashSet<PathBuf>>,
    cancel: Arc<AtomicBool>,
    semaphore: Arc<Semaphore>,
}

impl Scanner {
    pub fn new(config: Arc<ScanConfig>, event_tx: EventSender) -> Self {
        let max_scans = config.max_concurrent_scans.max(1);
        Self {
            config,
            event_tx,
            claimed: Arc::new(DashSet::new()),
            cancel: Arc::new(AtomicBool::new(false)),
            semaphore: Arc::new(Semaphore::new(max_scans)),
        }
    }

    pub fn config(&self) -> &Arc<ScanConfig> {
        &self.config
    }

    /// Ask every scan sharing this scanner's state to stop at its next entry.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    pub async fn scan(&self, filter: Option<String>) -> ScanResult {
        let result = self.run_scan(filter).await;

        if let Err(ref e) = result {
            if !matches!(e, ScanError::Cancelled) {
                tracing::debug!("Scan of {} failed: {}", self.config.root.display(), e);
                if self.config.fail_fast {
                    self.cancel();
                }
            }
        }

        result
    }

    async fn run_scan(&self, filter: Option<String>) -> ScanResult {
        check_root(&self.config.root)?;
        let matcher = ObjectFilter::new(filter.as_deref(), self.config.filter_mode)?;

        let _ = self.event_tx.send(Event::ScanStarted {
            filter: filter.clone(),
            path: self.config.root.clone(),
        });

        // Permit held for the whole traversal; released when this scope ends.
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ScanError::Cancelled)?;

        let scanner = self.clone();
        let label = filter_label(filter.as_deref());
        let report = tokio::task::spawn_blocking(move || scanner.scan_blocking(filter, &matcher))
            .await
            .map_err(|e| ScanError::TaskFailed {
                filter: label,
                message: e.to_string(),
            })??;

        let _ = self.event_tx.send(Event::ScanCompleted {
            filter: report.filter.clone(),
            removed: report.removed(),
            duration_ms: report.scan_duration.as_millis() as u64,
        });

        Ok(report)
    }

    fn scan_blocking(&self, filter: Option<String>, matcher: &ObjectFilter) -> ScanResult {
        let stats = ScanStats::new();
        let root = self.config.root.as_path();
        tracing::debug!(
            "Scanning {} for {} (recursive: {})",
            root.display(),
            filter_label(filter.as_deref()),
            self.config.recursive
        );

        if !self.config.recursive {
            return self.list_root(filter, matcher, &stats);
        }

        let mut visitor = TreeVisitor {
            executor: ActionExecutor::new(&self.config, &self.claimed, &self.event_tx, &stats),
            matcher,
            stats: &stats,
        };
        inspector::walk(root, &self.cancel, &mut visitor)?;
        let errors = visitor.executor.into_errors();

        let snapshot = stats.snapshot();
        Ok(ScanReport {
            filter,
            entries_visited: snapshot.entries_visited,
            files_deleted: snapshot.files_deleted,
            dirs_pruned: snapshot.dirs_pruned,
            listed: Vec::new(),
            errors,
            scan_duration: snapshot.elapsed,
        })
    }

    /// Enumerate the root's immediate children. Nothing is modified.
    fn list_root(
        &self,
        filter: Option<String>,
        matcher: &ObjectFilter,
        stats: &ScanStats,
    ) -> ScanResult {
        let root = self.config.root.as_path();
        let listing = inspector::list_children(root).map_err(|source| {
            ScanError::TraversalError {
                path: root.to_path_buf(),
                source,
            }
        })?;

        let mut listed = Vec::new();
        for entry in listing.entries {
            stats.increment_visited();
            if entry.kind == EntryKind::File && !matcher.matches(&entry.name) {
                continue;
            }
            let _ = self.event_tx.send(Event::Listed {
                filter: filter.clone(),
                name: entry.name.clone(),
            });
            listed.push(entry.name);
        }

        let errors: Vec<EntryError> = listing.errors;
        for error in &errors {
            tracing::warn!("{}: {}", error.path.display(), error.message);
        }

        let snapshot = stats.snapshot();
        Ok(ScanReport {
            filter,
            entries_visited: snapshot.entries_visited,
            listed,
            errors,
            scan_duration: snapshot.elapsed,
            ..ScanReport::default()
        })
    }
}

struct TreeVisitor<'a> {
    executor: ActionExecutor<'a>,
    matcher: &'a ObjectFilter,
    stats: &'a ScanStats,
}

impl Visitor for TreeVisitor<'_> {
    fn visit(&mut self, entry: &DirEntry, depth: usize) -> Result<Visit, ScanError> {
        self.stats.increment_visited();
        if depth == 0 {
            return Ok(Visit::Continue);
        }

        let classification = classify(entry);
        if classification == Classification::ZeroLengthFile && !self.matcher.matches(&entry.name) {
            return Ok(Visit::Continue);
        }

        match self.executor.apply(entry, classification) {
            ActionResult::Deleted | ActionResult::Pruned => Ok(Visit::Removed),
            ActionResult::Skipped | ActionResult::Failed(_) => Ok(Visit::Continue),
        }
    }

    fn entry_error(&mut self, error: EntryError) {
        self.executor.record_error(error);
    }
}

/// Verify the root exists and is a directory before any traversal starts.
pub fn check_root(root: &Path) -> Result<(), ScanError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::RootNotDirectory {
            path: root.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        }),
        Err(source) => Err(ScanError::TraversalError {
            path: root.to_path_buf(),
            source,
        }),
    }
}

pub fn filter_label(filter: Option<&str>) -> String {
    match filter {
        Some(f) => format!("'{}'", f),
        None => String::from("all objects"),
    }
}
