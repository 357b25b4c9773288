//! The checkpoint set: pinned `(height, hash)` pairs, append-only.

use crate::error::CheckpointError;
use crate::hash::{hash_from_hex, hash_to_hex, BlockHash, NULL_HASH};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error};

/// One `{height, hash}` entry of a checkpoint file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashLine {
    pub height: u64,
    pub hash: String,
}

/// On-disk checkpoint file layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashFile {
    #[serde(default)]
    pub hashlines: Vec<HashLine>,
}

/// Shared, thread-safe checkpoint set.
///
/// Clones are handles onto the same set. Every insertion takes the write
/// lock for exactly one key, so readers never wait on a whole load.
#[derive(Clone, Default)]
pub struct Checkpoints {
    points: Arc<RwLock<BTreeMap<u64, BlockHash>>>,
}

impl Checkpoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin `hash` at `height`.
    ///
    /// Re-adding the same hash is a no-op. A different hash at an already
    /// pinned height is a conflict and leaves the stored hash untouched.
    pub fn add(&self, height: u64, hash: BlockHash) -> Result<(), CheckpointError> {
        if hash == NULL_HASH {
            return Err(CheckpointError::InvalidHash(format!(
                "Null hash is not a valid checkpoint (height {})",
                height
            )));
        }

        let mut points = self.points.write();
        match points.get(&height).copied() {
            Some(existing) if existing == hash => Ok(()),
            Some(existing) => {
                error!(
                    height,
                    existing = %hash_to_hex(&existing),
                    proposed = %hash_to_hex(&hash),
                    "Checkpoint at given height already exists with a different hash"
                );
                Err(CheckpointError::Conflict {
                    height,
                    existing,
                    proposed: hash,
                })
            }
            None => {
                points.insert(height, hash);
                debug!(height, hash = %hash_to_hex(&hash), "Added checkpoint");
                Ok(())
            }
        }
    }

    /// Parse a hex hash and pin it at `height`.
    pub fn add_hex(&self, height: u64, hash_hex: &str) -> Result<(), CheckpointError> {
        let hash = hash_from_hex(hash_hex)?;
        self.add(height, hash)
    }

    pub fn lookup(&self, height: u64) -> Option<BlockHash> {
        self.points.read().get(&height).copied()
    }

    /// Highest pinned height, or `None` when nothing is pinned.
    pub fn highest_height(&self) -> Option<u64> {
        self.points.read().keys().next_back().copied()
    }

    /// True when `height` is at or below the highest checkpoint.
    pub fn is_in_checkpoint_zone(&self, height: u64) -> bool {
        self.highest_height().is_some_and(|max| height <= max)
    }

    /// Greatest pinned height that is `<= height`.
    pub fn boundary_at_or_below(&self, height: u64) -> Option<u64> {
        self.points.read().range(..=height).next_back().map(|(h, _)| *h)
    }

    pub fn len(&self) -> usize {
        self.points.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.read().is_empty()
    }

    /// Snapshot of every pinned checkpoint in ascending height order.
    pub fn points(&self) -> BTreeMap<u64, BlockHash> {
        self.points.read().clone()
    }

    /// Add every checkpoint of `other`, lowest height first.
    ///
    /// Stops at the first conflict. Checkpoints merged before it stay.
    pub fn merge_from(&self, other: &Checkpoints) -> Result<(), CheckpointError> {
        // Snapshot first: `other` may share our lock.
        for (height, hash) in other.points() {
            self.add(height, hash)?;
        }
        Ok(())
    }

    /// Report the first height at which `other` disagrees with this set.
    pub fn check_for_conflicts(&self, other: &Checkpoints) -> Result<(), CheckpointError> {
        let theirs = other.points();
        let ours = self.points.read();
        for (height, hash) in theirs {
            if let Some(existing) = ours.get(&height) {
                if *existing != hash {
                    return Err(CheckpointError::Conflict {
                        height,
                        existing: *existing,
                        proposed: hash,
                    });
                }
            }
        }
        Ok(())
    }

    /// Render the set in checkpoint file layout.
    pub fn to_hash_file(&self) -> HashFile {
        let hashlines = self
            .points
            .read()
            .iter()
            .map(|(height, hash)| HashLine {
                height: *height,
                hash: hash_to_hex(hash),
            })
            .collect();
        HashFile { hashlines }
    }

    /// Write the set as a checkpoint file, atomically via a temp file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), CheckpointError> {
        let json = serde_json::to_string_pretty(&self.to_hash_file())?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

impl std::fmt::Debug for Checkpoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkpoints")
            .field("len", &self.len())
            .field("highest_height", &self.highest_height())
            .finish()
    }
}
