//! Error types for ForkGuard

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckpointError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid block hash: {0}")]
    InvalidHash(String),
    #[error(
        "Checkpoint conflict at height {height}: have {}, got {}",
        hex::encode(.existing),
        hex::encode(.proposed)
    )]
    Conflict {
        height: u64,
        existing: [u8; 32],
        proposed: [u8; 32],
    },
    #[error("IO error: {0}")]
    Io(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Remote feed error: {0}")]
    Feed(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl CheckpointError {
    /// Height of the conflicting checkpoint, if this is a conflict.
    pub fn conflict_height(&self) -> Option<u64> {
        match self {
            CheckpointError::Conflict { height, .. } => Some(*height),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CheckpointError {
    fn from(err: std::io::Error) -> Self {
        CheckpointError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CheckpointError {
    fn from(err: serde_json::Error) -> Self {
        CheckpointError::Json(err.to_string())
    }
}

impl From<toml::de::Error> for CheckpointError {
    fn from(err: toml::de::Error) -> Self {
        CheckpointError::Config(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, CheckpointError>;
