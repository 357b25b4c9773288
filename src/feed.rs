//! Remote checkpoint feed sources
//!
//! The node does not resolve or authenticate feed domains itself. A
//! [`RecordSource`] hands back the raw text records published under a list
//! of domains; the loader parses them.

use crate::error::CheckpointError;
use std::fs;
use std::path::PathBuf;

/// Capability that fetches text records published under `domains`.
///
/// Implementations own timeouts and verification. An error means the feed as
/// a whole could not be fetched.
pub trait RecordSource: Send + Sync {
    fn fetch_text_records(&self, domains: &[&str]) -> Result<Vec<String>, CheckpointError>;
}

/// Source that never returns records.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeed;

impl RecordSource for NoFeed {
    fn fetch_text_records(&self, _domains: &[&str]) -> Result<Vec<String>, CheckpointError> {
        Ok(Vec::new())
    }
}

/// Fixed set of records, regardless of domains.
#[derive(Debug, Clone, Default)]
pub struct StaticRecords {
    records: Vec<String>,
}

impl StaticRecords {
    pub fn new<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records: records.into_iter().map(Into::into).collect(),
        }
    }
}

impl RecordSource for StaticRecords {
    fn fetch_text_records(&self, _domains: &[&str]) -> Result<Vec<String>, CheckpointError> {
        Ok(self.records.clone())
    }
}

/// Records previously fetched and verified by an operator tool, one per line.
#[derive(Debug, Clone)]
pub struct FileRecords {
    path: PathBuf,
}

impl FileRecords {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for FileRecords {
    fn fetch_text_records(&self, _domains: &[&str]) -> Result<Vec<String>, CheckpointError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            CheckpointError::Feed(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }
}
