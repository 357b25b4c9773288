use crate::checkpoints::{CheckpointCheck, CheckpointLoader, Checkpoints};
use crate::config::Config;
use crate::error::CheckpointError;
use crate::feed::RecordSource;
use crate::hardfork::{self, ForkVersion, HardForkFeature};
use crate::hash::BlockHash;
use crate::network::NetworkType;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` wins over `filter`.
///
/// Safe to call more than once; later calls leave the first subscriber.
pub fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
}

/// Checkpoint and fork-rule state for one running node.
///
/// This is what the consensus driver talks to.
pub struct Node {
    pub config: Config,
    pub network: NetworkType,
    checkpoints: Checkpoints,
    loader: CheckpointLoader,
}

impl Node {
    /// Load the network defaults, then the checkpoint file and (if enabled)
    /// the remote feed.
    pub fn init(config: Config, source: Box<dyn RecordSource>) -> Result<Self, CheckpointError> {
        let network = config.network.network_type;
        info!(%network, "Starting checkpoint subsystem");

        let checkpoints = Checkpoints::new();
        let loader = CheckpointLoader::new(checkpoints.clone(), source)
            .with_feed_domains(config.checkpoints.feed_domains.clone());

        loader.load_defaults(network)?;
        let node = Self {
            config,
            network,
            checkpoints,
            loader,
        };
        node.reload()?;

        info!(
            %network,
            checkpoints = node.checkpoints.len(),
            highest = ?node.highest_checkpointed_height(),
            "Checkpoints ready"
        );
        Ok(node)
    }

    /// Re-read the checkpoint file and feed. Only ever adds checkpoints.
    pub fn reload(&self) -> Result<(), CheckpointError> {
        let result = self.loader.load_all(
            &self.config.checkpoints.file_path(),
            self.network,
            self.config.checkpoints.enable_remote_feed,
        );
        if let Err(e) = &result {
            warn!(error = %e, "Checkpoint load failed");
        }
        result
    }

    pub fn checkpoints(&self) -> &Checkpoints {
        &self.checkpoints
    }

    pub fn verify_block(&self, height: u64, hash: &BlockHash) -> CheckpointCheck {
        self.checkpoints.verify_block(height, hash)
    }

    pub fn is_alternative_block_allowed(&self, best_height: u64, fork_height: u64) -> bool {
        self.checkpoints.is_alternative_block_allowed(best_height, fork_height)
    }

    pub fn highest_checkpointed_height(&self) -> Option<u64> {
        self.checkpoints.highest_height()
    }

    pub fn required_version(&self, feature: HardForkFeature) -> ForkVersion {
        hardfork::required_version(self.network, feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::feed::{NoFeed, StaticRecords};
    use tempfile::TempDir;

    fn config_for(dir: &TempDir, network: &str, remote_feed: bool) -> Config {
        let file = dir.path().join("checkpoints.json");
        parse_config(&format!(
            "[network]\nnetwork_type = \"{}\"\n\
             [checkpoints]\nfile = {:?}\nenable_remote_feed = {}\n",
            network,
            file.display().to_string(),
            remote_feed
        ))
        .unwrap()
    }

    #[test]
    fn test_primary_node_boots_with_defaults() {
        let dir = TempDir::new().unwrap();
        let node = Node::init(config_for(&dir, "primary", false), Box::new(NoFeed)).unwrap();

        assert_eq!(node.highest_checkpointed_height(), Some(58500));
        assert!(!node.is_alternative_block_allowed(60000, 58500));
        assert!(node.is_alternative_block_allowed(60000, 58501));
        assert_eq!(
            node.required_version(HardForkFeature::DevFundV3),
            ForkVersion::Version(5)
        );
    }

    #[test]
    fn test_remote_feed_respects_config_flag() {
        let dir = TempDir::new().unwrap();
        let record = format!("12:{}", hex::encode([0x12; 32]));

        let off = Node::init(
            config_for(&dir, "test", false),
            Box::new(StaticRecords::new([record.clone()])),
        )
        .unwrap();
        assert_eq!(off.highest_checkpointed_height(), None);

        let on = Node::init(
            config_for(&dir, "test", true),
            Box::new(StaticRecords::new([record])),
        )
        .unwrap();
        assert_eq!(on.highest_checkpointed_height(), Some(12));
        assert!(on.verify_block(12, &[0x12; 32]).passed());
    }

    #[test]
    fn test_reload_picks_up_new_file_entries() {
        let dir = TempDir::new().unwrap();
        let node = Node::init(config_for(&dir, "staging", false), Box::new(NoFeed)).unwrap();
        assert!(node.checkpoints().is_empty());

        let extra = Checkpoints::new();
        extra.add(77, [0x77; 32]).unwrap();
        extra.save_to_file(&node.config.checkpoints.file_path()).unwrap();

        node.reload().unwrap();
        assert_eq!(node.highest_checkpointed_height(), Some(77));
    }
}
