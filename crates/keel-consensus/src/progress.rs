//! Sync-progress estimation.
//!
//! Peers report their best height when they connect, but any one of them can
//! lie. The network height estimate is the median of those reports, never
//! lower than [`CheckpointRegistry::total_blocks_estimate`], so a node fed
//! low heights still knows it is behind the compiled-in checkpoints.

use crate::checkpoint::CheckpointRegistry;

/// Median of reported peer heights floored by the checkpoint estimate.
///
/// For an even number of reports the two middle values are averaged
/// (rounded down). With no reports the checkpoint estimate alone is used.
pub fn estimated_network_height(registry: &CheckpointRegistry, peer_heights: &[u64]) -> u64 {
    median(peer_heights).max(registry.total_blocks_estimate())
}

/// Whether the node is still below the highest checkpoint height.
pub fn is_initial_block_download(registry: &CheckpointRegistry, tip_height: u64) -> bool {
    tip_height < registry.total_blocks_estimate()
}

fn median(values: &[u64]) -> u64 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        let (a, b) = (sorted[mid - 1], sorted[mid]);
        a / 2 + b / 2 + (a % 2 + b % 2) / 2
    }
}

/// Local tip against the estimated network height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncProgress {
    pub tip_height: u64,
    pub target_height: u64,
}

impl SyncProgress {
    pub fn new(registry: &CheckpointRegistry, tip_height: u64, peer_heights: &[u64]) -> Self {
        Self {
            tip_height,
            target_height: estimated_network_height(registry, peer_heights),
        }
    }

    /// Fraction of the target reached, clamped to `[0.0, 1.0]`.
    pub fn fraction(&self) -> f64 {
        if self.target_height == 0 || self.tip_height >= self.target_height {
            return 1.0;
        }
        self.tip_height as f64 / self.target_height as f64
    }

    pub fn is_synced(&self) -> bool {
        self.tip_height >= self.target_height
    }

    /// Blocks still to download to reach the target.
    pub fn remaining(&self) -> u64 {
        self.target_height.saturating_sub(self.tip_height)
    }
}
