//! # keel-consensus: Checkpoint lock-in and trust anchors.
//!
//! - [`checkpoint::CheckpointRegistry`]: the compiled-in (height, hash) table
//!   for the active network, with block validation, the total-blocks
//!   estimate, and trust-anchor lookup against a local block index
//! - [`progress`]: sync-progress estimation floored by the checkpoint table

pub mod checkpoint;
pub mod progress;

pub use checkpoint::{CheckpointEntry, CheckpointRegistry};
pub use progress::SyncProgress;
