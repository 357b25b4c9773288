//! Network selection and per-network parameters
//!
//! Every deployment (primary, test, staging, local) carries its own ports,
//! network id, remote checkpoint feed and compiled-in checkpoints. The
//! parameters are plain runtime data chosen by matching on [`NetworkType`].

use crate::checkpoints::defaults;
use crate::error::CheckpointError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    #[default]
    #[serde(alias = "mainnet")]
    Primary,
    #[serde(alias = "testnet")]
    Test,
    #[serde(alias = "stagenet")]
    Staging,
    #[serde(alias = "fakechain")]
    Local,
    Undefined,
}

impl NetworkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkType::Primary => "primary",
            NetworkType::Test => "test",
            NetworkType::Staging => "staging",
            NetworkType::Local => "local",
            NetworkType::Undefined => "undefined",
        }
    }

    pub fn params(&self) -> &'static NetworkParams {
        NetworkParams::for_network(*self)
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkType {
    type Err = CheckpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" | "mainnet" => Ok(NetworkType::Primary),
            "test" | "testnet" => Ok(NetworkType::Test),
            "staging" | "stagenet" => Ok(NetworkType::Staging),
            "local" | "fakechain" => Ok(NetworkType::Local),
            "undefined" => Ok(NetworkType::Undefined),
            other => Err(CheckpointError::Parse(format!("Unknown network type: {}", other))),
        }
    }
}

/// Static parameters of one deployment.
#[derive(Debug)]
pub struct NetworkParams {
    pub network: NetworkType,
    pub p2p_port: u16,
    pub rpc_port: u16,
    pub zmq_rpc_port: u16,
    pub network_id: [u8; 16],
    /// Domains publishing `<height>:<hash>` checkpoint records.
    pub feed_domains: &'static [&'static str],
    /// Compiled-in `(height, hex hash)` checkpoints.
    pub default_checkpoints: &'static [(u64, &'static str)],
}

static PRIMARY: NetworkParams = NetworkParams {
    network: NetworkType::Primary,
    p2p_port: 19743,
    rpc_port: 19744,
    zmq_rpc_port: 19745,
    network_id: [
        0x04, 0x06, 0xdf, 0xce, 0xfc, 0x7c, 0x27, 0x4a, 0x24, 0xd4, 0xf3, 0x8d, 0x41, 0x42, 0x43,
        0x41,
    ],
    feed_domains: &[
        "checkpoints.forkguard.se",
        "checkpoints.forkguard.org",
        "checkpoints.forkguard.net",
        "checkpoints.forkguard.co",
    ],
    default_checkpoints: defaults::PRIMARY_CHECKPOINTS,
};

static TEST: NetworkParams = NetworkParams {
    network: NetworkType::Test,
    p2p_port: 29743,
    rpc_port: 29744,
    zmq_rpc_port: 29745,
    network_id: [
        0x12, 0x04, 0x06, 0xdf, 0xce, 0xfc, 0x7c, 0x27, 0x4a, 0x24, 0xd4, 0xf3, 0x41, 0x44, 0x44,
        0x43,
    ],
    feed_domains: &[
        "testpoints.forkguard.se",
        "testpoints.forkguard.org",
        "testpoints.forkguard.net",
        "testpoints.forkguard.co",
    ],
    default_checkpoints: &[],
};

static STAGING: NetworkParams = NetworkParams {
    network: NetworkType::Staging,
    p2p_port: 39743,
    rpc_port: 39744,
    zmq_rpc_port: 39745,
    network_id: [
        0x15, 0x77, 0x3a, 0x26, 0x42, 0xa0, 0x3f, 0xf3, 0xe5, 0x79, 0x72, 0x8d, 0x4e, 0x5a, 0xf2,
        0x98,
    ],
    feed_domains: &[
        "stagingpoints.forkguard.se",
        "stagingpoints.forkguard.org",
        "stagingpoints.forkguard.net",
        "stagingpoints.forkguard.co",
    ],
    default_checkpoints: &[],
};

// Local chains have no listeners and nothing to pin.
static LOCAL: NetworkParams = NetworkParams {
    network: NetworkType::Local,
    p2p_port: 0,
    rpc_port: 0,
    zmq_rpc_port: 0,
    network_id: [0u8; 16],
    feed_domains: &[],
    default_checkpoints: &[],
};

static UNDEFINED: NetworkParams = NetworkParams {
    network: NetworkType::Undefined,
    p2p_port: 0,
    rpc_port: 0,
    zmq_rpc_port: 0,
    network_id: [0u8; 16],
    feed_domains: &[],
    default_checkpoints: &[],
};

impl NetworkParams {
    pub fn for_network(network: NetworkType) -> &'static NetworkParams {
        match network {
            NetworkType::Primary => &PRIMARY,
            NetworkType::Test => &TEST,
            NetworkType::Staging => &STAGING,
            NetworkType::Local => &LOCAL,
            NetworkType::Undefined => &UNDEFINED,
        }
    }
}
