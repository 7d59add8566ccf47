use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Per-traversal counters.
pub struct ScanStats {
    pub entries_visited: AtomicUsize,
    pub files_deleted: AtomicUsize,
    pub dirs_pruned: AtomicUsize,
    pub start_time: Instant,
}

impl ScanStats {
    pub fn new() -> Self {
        Self {
            entries_visited: AtomicUsize::new(0),
            files_deleted: AtomicUsize::new(0),
            dirs_pruned: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn increment_visited(&self) {
        self.entries_visited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_files_deleted(&self) {
        self.files_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_dirs_pruned(&self) {
        self.dirs_pruned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            entries_visited: self.entries_visited.load(Ordering::Relaxed),
            files_deleted: self.files_deleted.load(Ordering::Relaxed),
            dirs_pruned: self.dirs_pruned.load(Ordering::Relaxed),
            elapsed: self.elapsed(),
        }
    }
}

impl Default for ScanStats {
    fn default() -> Self {
        Self::new()
    }
}

pub struct StatsSnapshot {
    pub entries_visited: usize,
    pub files_deleted: usize,
    pub dirs_pruned: usize,
    pub elapsed: Duration,
}
