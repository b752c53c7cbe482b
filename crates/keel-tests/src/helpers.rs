//! Shared test helpers for integration tests.

use keel_core::block_index::{BlockIndexNode, MemoryBlockIndex};
use keel_core::constants::MAINNET_CHECKPOINTS;
use keel_core::types::Hash256;

/// Simple block hash from a seed byte.
pub fn hash(seed: u8) -> Hash256 {
    Hash256([seed; 32])
}

/// Mainnet checkpoint `i` as `(height, hash)`.
pub fn mainnet_checkpoint(i: usize) -> (u64, Hash256) {
    let (height, bytes) = MAINNET_CHECKPOINTS[i];
    (height, Hash256(bytes))
}

/// Index holding only the mainnet checkpoint blocks whose positions are in `which`.
///
/// Parent links point at the previous checkpoint in the list, which is
/// enough for anchor lookup; intermediate blocks are not materialised.
pub fn index_with_checkpoints(which: &[usize]) -> MemoryBlockIndex {
    let mut index = MemoryBlockIndex::new();
    let mut prev = Hash256::ZERO;
    for &i in which {
        let (height, hash) = mainnet_checkpoint(i);
        index.insert(BlockIndexNode::new(hash, prev, height));
        prev = hash;
    }
    index
}

/// Index of a branch of `len` blocks whose hashes never collide with a checkpoint.
pub fn attacker_branch(len: u64) -> MemoryBlockIndex {
    let mut index = MemoryBlockIndex::new();
    let mut prev = Hash256::ZERO;
    for height in 0..len {
        let mut bytes = [0xEEu8; 32];
        bytes[..8].copy_from_slice(&height.to_le_bytes());
        let hash = Hash256(bytes);
        index.insert(BlockIndexNode::new(hash, prev, height));
        prev = hash;
    }
    index
}
