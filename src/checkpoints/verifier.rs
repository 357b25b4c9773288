/// Block verification against the checkpoint set
use crate::checkpoints::store::Checkpoints;
use crate::hash::{hash_to_hex, BlockHash};
use tracing::{debug, info, warn};

/// Outcome of checking one block against the checkpoint set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointCheck {
    /// False only when a checkpoint exists and the hash differs.
    pub accepted: bool,
    /// True when the height is pinned.
    pub is_checkpoint: bool,
}

impl CheckpointCheck {
    /// Block matched a pinned hash.
    pub fn passed(&self) -> bool {
        self.accepted && self.is_checkpoint
    }

    /// Block contradicts a pinned hash and must be rejected.
    pub fn failed(&self) -> bool {
        !self.accepted
    }
}

impl Checkpoints {
    /// Check a block's hash against the checkpoint at its height.
    pub fn verify_block(&self, height: u64, hash: &BlockHash) -> CheckpointCheck {
        let Some(expected) = self.lookup(height) else {
            debug!(height, "No checkpoint at height");
            return CheckpointCheck {
                accepted: true,
                is_checkpoint: false,
            };
        };

        if expected == *hash {
            info!(height, hash = %hash_to_hex(hash), "Checkpoint passed");
            CheckpointCheck {
                accepted: true,
                is_checkpoint: true,
            }
        } else {
            warn!(
                height,
                expected = %hash_to_hex(&expected),
                received = %hash_to_hex(hash),
                "Checkpoint FAILED"
            );
            CheckpointCheck {
                accepted: false,
                is_checkpoint: true,
            }
        }
    }

    pub fn check_block(&self, height: u64, hash: &BlockHash) -> bool {
        self.verify_block(height, hash).accepted
    }
}
