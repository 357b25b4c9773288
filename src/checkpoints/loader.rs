//! Checkpoint ingestion
//!
//! Checkpoints come from three places, applied in this order at startup:
//! - the compiled-in table of the selected network
//! - an optional JSON file maintained by the operator
//! - an optional remote feed of `<height>:<hash>` text records
//!
//! All I/O happens before the store is touched. Records are then applied
//! one `add` at a time, so verification keeps running against what is
//! already loaded.

use crate::checkpoints::store::{Checkpoints, HashFile};
use crate::error::CheckpointError;
use crate::feed::{NoFeed, RecordSource};
use crate::hash::{hash_from_hex, BlockHash, NULL_HASH};
use crate::network::NetworkType;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Counts reported by a single load step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records passed to `add` successfully (including idempotent re-adds).
    pub added: usize,
    /// File records at or below the previous highest checkpoint.
    pub skipped: usize,
    /// Feed lines that could not be parsed.
    pub malformed: usize,
}

/// Parse one remote feed record of the form `<decimal height>:<hex hash>`.
pub fn parse_feed_record(record: &str) -> Result<(u64, BlockHash), CheckpointError> {
    let (height_str, hash_str) = record
        .split_once(':')
        .ok_or_else(|| CheckpointError::Parse(format!("Missing ':' in record {:?}", record)))?;

    let height = height_str
        .trim()
        .parse::<u64>()
        .map_err(|e| CheckpointError::Parse(format!("Invalid height {:?}: {}", height_str, e)))?;

    let hash = hash_from_hex(hash_str)?;
    if hash == NULL_HASH {
        return Err(CheckpointError::Parse(format!(
            "Null hash in record for height {}",
            height
        )));
    }
    Ok((height, hash))
}

pub struct CheckpointLoader {
    store: Checkpoints,
    source: Box<dyn RecordSource>,
    feed_domains: Option<Vec<String>>,
}

impl CheckpointLoader {
    pub fn new(store: Checkpoints, source: Box<dyn RecordSource>) -> Self {
        Self {
            store,
            source,
            feed_domains: None,
        }
    }

    /// Loader with no remote feed.
    pub fn without_feed(store: Checkpoints) -> Self {
        Self::new(store, Box::new(NoFeed))
    }

    /// Query these domains instead of the network's built-in list.
    pub fn with_feed_domains(mut self, domains: Vec<String>) -> Self {
        if !domains.is_empty() {
            self.feed_domains = Some(domains);
        }
        self
    }

    pub fn store(&self) -> &Checkpoints {
        &self.store
    }

    /// Insert the compiled-in checkpoints of `network`.
    pub fn load_defaults(&self, network: NetworkType) -> Result<LoadSummary, CheckpointError> {
        let mut summary = LoadSummary::default();
        for (height, hash_hex) in network.params().default_checkpoints {
            self.store.add_hex(*height, hash_hex)?;
            summary.added += 1;
        }
        debug!(%network, count = summary.added, "Loaded default checkpoints");
        Ok(summary)
    }

    /// Merge checkpoints from a JSON hash file.
    ///
    /// A missing file is not an error. Records at or below the highest
    /// checkpoint already known are ignored without comparing hashes. A
    /// conflict aborts the rest of the file; earlier records stay applied.
    pub fn load_from_file(&self, path: &Path) -> Result<LoadSummary, CheckpointError> {
        let mut summary = LoadSummary::default();

        if !path.exists() {
            info!(path = %path.display(), "Blockchain checkpoints file not found");
            return Ok(summary);
        }

        info!(path = %path.display(), "Adding checkpoints from blockchain hashfile");
        let contents = fs::read_to_string(path)?;
        let file: HashFile = serde_json::from_str(&contents).map_err(|e| {
            CheckpointError::Json(format!(
                "Error loading checkpoints from {}: {}",
                path.display(),
                e
            ))
        })?;

        let prev_max_height = self.store.highest_height();
        debug!(?prev_max_height, "Highest checkpoint before file load");

        for line in &file.hashlines {
            if prev_max_height.is_some_and(|max| line.height <= max) {
                debug!(height = line.height, "Ignoring checkpoint height");
                summary.skipped += 1;
                continue;
            }
            debug!(height = line.height, hash = %line.hash, "Adding checkpoint");
            self.store.add_hex(line.height, &line.hash)?;
            summary.added += 1;
        }

        info!(
            added = summary.added,
            skipped = summary.skipped,
            "Loaded checkpoints from file"
        );
        Ok(summary)
    }

    /// Merge checkpoints from the network's remote feed.
    ///
    /// Lines that fail to parse are skipped. A conflict aborts the rest of
    /// the batch.
    pub fn load_from_feed(&self, network: NetworkType) -> Result<LoadSummary, CheckpointError> {
        let domains: Vec<&str> = match &self.feed_domains {
            Some(domains) => domains.iter().map(String::as_str).collect(),
            None => network.params().feed_domains.to_vec(),
        };

        let records = self.source.fetch_text_records(&domains)?;

        let mut summary = LoadSummary::default();
        for record in &records {
            let (height, hash) = match parse_feed_record(record) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!(record = %record, error = %e, "Skipping malformed feed record");
                    summary.malformed += 1;
                    continue;
                }
            };
            self.store.add(height, hash)?;
            summary.added += 1;
        }

        info!(
            %network,
            added = summary.added,
            malformed = summary.malformed,
            "Loaded checkpoints from remote feed"
        );
        Ok(summary)
    }

    /// Load the checkpoint file, then the remote feed when enabled.
    ///
    /// Only the file step decides the result. Feed failures are logged.
    pub fn load_all(
        &self,
        path: &Path,
        network: NetworkType,
        use_remote_feed: bool,
    ) -> Result<(), CheckpointError> {
        let result = self.load_from_file(path).map(|_| ());

        if use_remote_feed {
            if let Err(e) = self.load_from_feed(network) {
                warn!(%network, error = %e, "Remote checkpoint feed failed");
            }
        }

        result
    }
}
