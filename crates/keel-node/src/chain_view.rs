//! Checkpoint-aware view over the node's block index.
//!
//! [`ChainView`] pairs the immutable [`CheckpointRegistry`] with the block
//! index behind a `RwLock`. The registry is shared without locking; the index
//! read lock is held for the whole trust-anchor scan so the result reflects a
//! single consistent snapshot.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use keel_consensus::checkpoint::CheckpointRegistry;
use keel_consensus::progress::{is_initial_block_download, SyncProgress};
use keel_core::block_index::{BlockIndexNode, MemoryBlockIndex};
use keel_core::error::BlockError;

use crate::config::NodeConfig;

#[derive(Debug, Default)]
struct IndexState {
    index: MemoryBlockIndex,
    best_height: Option<u64>,
}

/// Block index plus the checkpoints that constrain it. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ChainView {
    checkpoints: Arc<CheckpointRegistry>,
    state: Arc<RwLock<IndexState>>,
}

impl ChainView {
    pub fn new(checkpoints: Arc<CheckpointRegistry>) -> Self {
        Self {
            checkpoints,
            state: Arc::new(RwLock::new(IndexState::default())),
        }
    }

    /// Build the registry for the configured network and an empty index.
    pub fn from_config(config: &NodeConfig) -> Self {
        let registry = CheckpointRegistry::new(config.network);
        info!(
            network = %config.network,
            checkpoints = registry.len(),
            estimate = registry.total_blocks_estimate(),
            "checkpoints loaded"
        );
        Self::new(Arc::new(registry))
    }

    pub fn checkpoints(&self) -> &Arc<CheckpointRegistry> {
        &self.checkpoints
    }

    /// Add a block to the index after checking it against the checkpoints.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::CheckpointMismatch`] if the block sits at a
    /// checkpoint height with a different hash; the index is left unchanged.
    pub fn insert_block(&self, node: BlockIndexNode) -> Result<(), BlockError> {
        self.checkpoints.check_block(node.height, &node.hash)?;

        let mut state = self.state.write();
        let height = node.height;
        if self.checkpoints.checkpoint_at(height).is_some() {
            debug!(height, hash = %node.hash, "checkpoint block indexed");
        }
        state.index.insert(node);
        state.best_height = Some(state.best_height.map_or(height, |best| best.max(height)));
        Ok(())
    }

    /// Number of indexed blocks.
    pub fn len(&self) -> usize {
        self.state.read().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().index.is_empty()
    }

    /// Height of the highest indexed block, if any.
    pub fn best_height(&self) -> Option<u64> {
        self.state.read().best_height
    }

    /// The highest checkpoint block present locally.
    pub fn trust_anchor(&self) -> Option<BlockIndexNode> {
        let state = self.state.read();
        self.checkpoints
            .last_checkpoint_present_in(&state.index)
            .cloned()
    }

    /// Refuse a reorg forking below the current trust anchor.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::ForkBelowCheckpoint`] when `fork_height` is below
    /// the anchor height.
    pub fn check_fork_point(&self, fork_height: u64) -> Result<(), BlockError> {
        let state = self.state.read();
        self.checkpoints.check_fork_point(fork_height, &state.index)
    }

    /// Progress of the local index against peer-reported heights.
    pub fn sync_progress(&self, peer_heights: &[u64]) -> SyncProgress {
        let tip = self.best_height().unwrap_or(0);
        SyncProgress::new(&self.checkpoints, tip, peer_heights)
    }

    /// Whether the local index is still below the last checkpoint.
    pub fn is_initial_block_download(&self) -> bool {
        let tip = self.best_height().unwrap_or(0);
        is_initial_block_download(&self.checkpoints, tip)
    }
}
