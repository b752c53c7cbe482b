//! Error types for the Keel checkpoint subsystem.
use thiserror::Error;

use crate::types::Hash256;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("rejected by checkpoint lock-in at height {height}: expected {expected}, got {got}")]
    CheckpointMismatch { height: u64, expected: Hash256, got: Hash256 },
    #[error("fork at height {fork_height} would orphan checkpoint at height {anchor_height}")]
    ForkBelowCheckpoint { fork_height: u64, anchor_height: u64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckpointError {
    #[error("duplicate checkpoint height: {0}")] DuplicateHeight(u64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashParseError {
    #[error("invalid hash length: {0} hex digits, expected 64")] InvalidLength(usize),
    #[error("invalid hex: {0}")] InvalidHex(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config load: {0}")] Load(String),
    #[error("unknown network: {0}")] UnknownNetwork(String),
}

#[derive(Error, Debug)]
pub enum KeelError {
    #[error(transparent)] Block(#[from] BlockError),
    #[error(transparent)] Checkpoint(#[from] CheckpointError),
    #[error(transparent)] HashParse(#[from] HashParseError),
    #[error(transparent)] Config(#[from] ConfigError),
}
