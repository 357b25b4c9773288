#![forbid(unsafe_code)]
//! Operator CLI for inspecting checkpoints and fork rules

use clap::{Parser, Subcommand};
use colored::*;
use forkguard::config::{load_config, DEFAULT_CONFIG_PATH};
use forkguard::feed::{FileRecords, NoFeed, RecordSource};
use forkguard::hardfork::{self, HardForkFeature};
use forkguard::hash::{hash_from_hex, hash_to_hex};
use forkguard::network::NetworkType;
use forkguard::node::{init_tracing, Node};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "forkguard", version, about = "Checkpoint and hard-fork rule inspector")]
struct Cli {
    /// Path to config.toml
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the configured network (primary, test, staging, local)
    #[arg(long)]
    network: Option<NetworkType>,

    /// Override the checkpoint JSON file
    #[arg(long)]
    checkpoints: Option<PathBuf>,

    /// Enable the remote checkpoint feed
    #[arg(long)]
    remote_feed: bool,

    /// Read remote feed records from this file, one `<height>:<hash>` per line
    #[arg(long)]
    feed_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show loaded checkpoints
    Status,
    /// Check a block hash against the checkpoint at its height
    Check { height: u64, hash: String },
    /// Ask whether a branch forking at FORK may replace a chain of height BEST
    Alt { best: u64, fork: u64 },
    /// Show hard-fork activation versions
    Fork { feature: Option<HardForkFeature> },
    /// Write all loaded checkpoints to a JSON file
    Export { path: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut config = load_config(&cli.config)?;
    init_tracing(&config.logging.filter);

    if let Some(network) = cli.network {
        config.network.network_type = network;
    }
    if let Some(path) = &cli.checkpoints {
        config.checkpoints.file = path.display().to_string();
    }
    if cli.remote_feed || cli.feed_file.is_some() {
        config.checkpoints.enable_remote_feed = true;
    }

    let source: Box<dyn RecordSource> = match &cli.feed_file {
        Some(path) => Box::new(FileRecords::new(path)),
        None => Box::new(NoFeed),
    };

    let network = config.network.network_type;
    let node = Node::init(config, source)?;

    match cli.command {
        Command::Status => {
            println!("{}", "Checkpoints".bright_cyan().bold());
            println!("  network: {}", network.to_string().bright_white());
            match node.highest_checkpointed_height() {
                Some(height) => println!("  highest: {}", height.to_string().bright_white()),
                None => println!("  highest: {}", "none".yellow()),
            }
            for (height, hash) in node.checkpoints().points() {
                println!("  {:>10}  {}", height, hash_to_hex(&hash));
            }
        }
        Command::Check { height, hash } => {
            let hash = hash_from_hex(&hash)?;
            let check = node.verify_block(height, &hash);
            if !check.is_checkpoint {
                println!("{} no checkpoint at height {}", "UNCHECKED".yellow(), height);
            } else if check.accepted {
                println!("{} checkpoint matches at height {}", "PASSED".bright_green(), height);
            } else {
                println!(
                    "{} checkpoint mismatch at height {}",
                    "FAILED".bright_red().bold(),
                    height
                );
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Alt { best, fork } => {
            if node.is_alternative_block_allowed(best, fork) {
                println!(
                    "{} branch forking at {} may replace chain at {}",
                    "ALLOWED".bright_green(),
                    fork,
                    best
                );
            } else {
                println!(
                    "{} branch forking at {} crosses a checkpoint",
                    "REJECTED".bright_red().bold(),
                    fork
                );
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Fork { feature } => {
            let features = match feature {
                Some(feature) => vec![feature],
                None => HardForkFeature::ALL.to_vec(),
            };
            println!("{}", format!("Hard forks ({})", network).bright_cyan().bold());
            for feature in features {
                let version = hardfork::required_version(network, feature);
                println!("  {:<22} {}", feature.to_string(), version);
            }
        }
        Command::Export { path } => {
            node.checkpoints().save_to_file(&path)?;
            println!(
                "{} {} checkpoints to {}",
                "Exported".bright_green(),
                node.checkpoints().len(),
                path.display()
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
