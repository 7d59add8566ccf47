use globset::{Glob, GlobMatcher};

use crate::config::settings::FilterMode;
use crate::error::ScanError;

/// Object-type filter for one pass.
#[derive(Debug, Clone)]
pub enum ObjectFilter {
    /// Matches every file.
    All,
    /// Matches files whose name matches the glob.
    Glob(GlobMatcher),
}

impl ObjectFilter {
    pub fn new(filter: Option<&str>, mode: FilterMode) -> Result<Self, ScanError> {
        match (filter, mode) {
            (Some(pattern), FilterMode::Glob) => {
                let glob = Glob::new(pattern).map_err(|source| ScanError::InvalidFilter {
                    pattern: pattern.to_string(),
                    source,
                })?;
                Ok(ObjectFilter::Glob(glob.compile_matcher()))
            }
            _ => Ok(ObjectFilter::All),
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            ObjectFilter::All => true,
            ObjectFilter::Glob(matcher) => matcher.is_match(file_name),
        }
    }
}
