//! Configuration management for ForkGuard

use crate::error::CheckpointError;
use crate::network::NetworkType;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub checkpoints: CheckpointConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub network_type: NetworkType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckpointConfig {
    #[serde(default = "default_checkpoint_file")]
    pub file: String,
    /// Remote feed ingestion is opt-in.
    #[serde(default)]
    pub enable_remote_feed: bool,
    /// Overrides the network's built-in feed domains when non-empty.
    #[serde(default)]
    pub feed_domains: Vec<String>,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            file: default_checkpoint_file(),
            enable_remote_feed: false,
            feed_domains: Vec::new(),
        }
    }
}

impl CheckpointConfig {
    pub fn file_path(&self) -> PathBuf {
        PathBuf::from(&self.file)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_checkpoint_file() -> String {
    "./data/checkpoints.json".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Parse and validate configuration text.
pub fn parse_config(config_str: &str) -> Result<Config, CheckpointError> {
    let config: Config = toml::from_str(config_str)?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration from `path`, falling back to defaults when the file
/// is absent or empty. Any other read failure is an error.
pub fn load_config(path: &Path) -> Result<Config, CheckpointError> {
    let config_str = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => {
            return Err(CheckpointError::Io(format!(
                "Failed to read config {}: {}",
                path.display(),
                e
            )));
        }
    };
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    parse_config(&config_str)
}

fn validate(config: &Config) -> Result<(), CheckpointError> {
    if config.checkpoints.file.trim().is_empty() {
        return Err(CheckpointError::Config(
            "checkpoints.file must be set in config.toml".to_string(),
        ));
    }
    if config.checkpoints.feed_domains.iter().any(|d| d.trim().is_empty()) {
        return Err(CheckpointError::Config(
            "checkpoints.feed_domains must not contain empty entries".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_file_absent() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.network.network_type, NetworkType::Primary);
        assert_eq!(config.checkpoints.file, "./data/checkpoints.json");
        assert!(!config.checkpoints.enable_remote_feed);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_unreadable_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[network]\nnetwork_type = \"test\"\n").unwrap();

        // a directory exists but cannot be read as a file
        let result = load_config(dir.path());
        assert!(matches!(result, Err(CheckpointError::Io(_))));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "  \n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.network.network_type, NetworkType::Primary);
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [network]
            network_type = "stagenet"

            [checkpoints]
            file = "/var/lib/node/checkpoints.json"
            enable_remote_feed = true
            feed_domains = ["points.example.org"]

            [logging]
            filter = "forkguard=debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.network.network_type, NetworkType::Staging);
        assert_eq!(
            config.checkpoints.file_path(),
            PathBuf::from("/var/lib/node/checkpoints.json")
        );
        assert!(config.checkpoints.enable_remote_feed);
        assert_eq!(config.checkpoints.feed_domains, vec!["points.example.org".to_string()]);
        assert_eq!(config.logging.filter, "forkguard=debug");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config("[network]\nnetwork_type = \"test\"\n").unwrap();
        assert_eq!(config.network.network_type, NetworkType::Test);
        assert_eq!(config.checkpoints.file, "./data/checkpoints.json");
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            parse_config("[checkpoints]\nfile = \"\"\n"),
            Err(CheckpointError::Config(_))
        ));
        assert!(parse_config("[network]\nnetwork_type = \"moonnet\"\n").is_err());
        assert!(parse_config("[checkpoints]\nfeed_domains = [\" \"]\n").is_err());
    }
}
