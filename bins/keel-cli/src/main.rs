//! keel-cli: Inspect the compiled-in checkpoints.
//!
//! Lists the checkpoint table for a network, checks a (height, hash) pair
//! against it, and reports the total-blocks estimate and sync progress.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use keel_consensus::checkpoint::CheckpointRegistry;
use keel_consensus::progress::{is_initial_block_download, SyncProgress};
use keel_core::constants::NetworkType;
use keel_core::types::Hash256;
use keel_node_lib::{init_logging, LogFormat, NodeConfig};

/// Keel checkpoint inspector.
#[derive(Parser, Debug)]
#[command(name = "keel-cli", version, about = "Inspect Keel's compiled-in checkpoints")]
struct Cli {
    /// Network profile ("mainnet" or "testnet"). Overrides the config file.
    #[arg(long, global = true)]
    network: Option<NetworkType>,

    /// Shorthand for `--network testnet`.
    #[arg(long, global = true, conflicts_with = "network")]
    testnet: bool,

    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format ("text" or "json"). Overrides the config file.
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every checkpoint as `height hash`.
    List {
        /// Emit a JSON array instead of plain lines.
        #[arg(long)]
        json: bool,
    },
    /// Check a block hash against the checkpoint at `height`.
    Verify {
        height: u64,
        hash: String,
    },
    /// Print the total-blocks estimate (highest checkpoint height).
    Estimate,
    /// Report sync progress for a local tip height.
    Progress {
        tip: u64,
        /// Best height reported by a peer; repeat for several peers.
        #[arg(long = "peer")]
        peers: Vec<u64>,
    },
    /// Print the resolved configuration as JSON.
    Config,
}

#[derive(Serialize)]
struct CheckpointRow {
    height: u64,
    hash: Hash256,
}

impl Cli {
    /// Resolve the layered config, then apply command-line overrides.
    fn load_config(&self) -> Result<NodeConfig> {
        let mut config = NodeConfig::load(self.config.as_deref()).context("loading configuration")?;
        if let Some(network) = self.network {
            config.network = network;
        }
        if self.testnet {
            config.network = NetworkType::Testnet;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(&config.log_level, config.log_format).context("initialising logging")?;
    debug!(network = %config.network, "keel-cli starting");

    let registry = CheckpointRegistry::new(config.network);

    match cli.command {
        Commands::List { json } => {
            if json {
                let rows: Vec<CheckpointRow> = registry
                    .entries()
                    .iter()
                    .map(|e| CheckpointRow {
                        height: e.height,
                        hash: e.hash,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for entry in registry.entries() {
                    println!("{} {}", entry.height, entry.hash);
                }
            }
        }
        Commands::Verify { height, hash } => {
            let hash: Hash256 = hash
                .parse()
                .with_context(|| format!("invalid block hash: {hash}"))?;
            match registry.check_block(height, &hash) {
                Ok(()) => println!("ok"),
                Err(e) => {
                    eprintln!("{e}");
                    process::exit(1);
                }
            }
        }
        Commands::Estimate => {
            println!("{}", registry.total_blocks_estimate());
        }
        Commands::Progress { tip, peers } => {
            let progress = SyncProgress::new(&registry, tip, &peers);
            println!(
                "{}/{} blocks ({:.2}%), initial block download: {}",
                progress.tip_height,
                progress.target_height,
                progress.fraction() * 100.0,
                is_initial_block_download(&registry, tip)
            );
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
