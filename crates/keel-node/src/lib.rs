//! # keel-node: Checkpoint-aware node composition.
//!
//! Wires the checkpoint registry into a running node:
//! - [`config::NodeConfig`]: layered configuration (defaults, TOML file, `KEEL_*` env)
//! - [`logging`]: tracing subscriber initialisation
//! - [`chain_view::ChainView`]: shared block index guarded by checkpoints

pub mod chain_view;
pub mod config;
pub mod logging;

pub use chain_view::ChainView;
pub use config::NodeConfig;
pub use logging::{init_logging, LogFormat};
