/// Reorg gating: which alternative branches may replace the best chain
use crate::checkpoints::store::Checkpoints;
use tracing::debug;

impl Checkpoints {
    /// Whether a branch forking at `fork_height` may replace a best chain of
    /// height `best_height`.
    ///
    /// A branch may never diverge at or below the highest checkpoint the best
    /// chain has already passed. Before the first checkpoint anything goes,
    /// except forking at genesis.
    pub fn is_alternative_block_allowed(&self, best_height: u64, fork_height: u64) -> bool {
        if fork_height == 0 {
            return false;
        }

        match self.boundary_at_or_below(best_height) {
            None => true,
            Some(boundary) => {
                let allowed = fork_height > boundary;
                if !allowed {
                    debug!(
                        best_height,
                        fork_height,
                        boundary,
                        "Alternative branch forks at or below checkpoint"
                    );
                }
                allowed
            }
        }
    }
}
