use std::path::PathBuf;

/// How object-type filters affect a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Every filter scans the whole tree.
    #[default]
    Redundant,
    /// Filters are file-name globs; only matching files are deleted or listed.
    Glob,
}

/// Run configuration. Built once at startup and shared read-only by every scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub root: PathBuf,
    pub recursive: bool,
    pub delete_zero_files: bool,
    pub prune_empty_dirs: bool,
    pub mute: bool,
    pub object_types: Vec<String>,
    pub filter_mode: FilterMode,
    pub fail_fast: bool,
    pub max_concurrent_scans: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let parallelism = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        Self {
            root: PathBuf::from("."),
            recursive: false,
            delete_zero_files: false,
            prune_empty_dirs: false,
            mute: false,
            object_types: vec![],
            filter_mode: FilterMode::Redundant,
            fail_fast: false,
            max_concurrent_scans: cap_by_fd_limit(parallelism),
        }
    }
}

impl ScanConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Filters to launch one traversal for. An empty list yields a single
    /// unfiltered pass, represented by `None`. A plain listing of the root
    /// is the same for every redundant filter, so it runs once.
    pub fn passes(&self) -> Vec<Option<String>> {
        let listing_once = !self.recursive && self.filter_mode == FilterMode::Redundant;
        if self.object_types.is_empty() || listing_once {
            vec![None]
        } else {
            self.object_types.iter().cloned().map(Some).collect()
        }
    }
}

/// Cap concurrency based on the system's file descriptor soft limit.
/// A traversal holds one directory handle while listing; 25% of fds stay
/// reserved for stdio and the runtime.
pub fn cap_by_fd_limit(max_scans: usize) -> usize {
    #[cfg(unix)]
    {
        let mut rlim = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        let ret = unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut rlim) };
        if ret == 0 && rlim.rlim_cur != libc::RLIM_INFINITY {
            let usable = rlim.rlim_cur as usize * 3 / 4;
            return max_scans.min(usable).max(1);
        }
    }
    max_scans.max(1)
}
