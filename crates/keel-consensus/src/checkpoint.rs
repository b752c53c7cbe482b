//! Header checkpoint verification.
//!
//! A [`CheckpointRegistry`] holds the compiled-in (height, hash) pairs for the
//! active network. It verifies that blocks at checkpoint heights carry the
//! expected hash, estimates a floor for the total chain height, and finds the
//! highest checkpoint the local block index already contains (the trust
//! anchor).
//!
//! # Attack vectors
//!
//! - **Long-range rewrite:** Early history was mined at low difficulty, so an
//!   attacker could cheaply build an alternate branch from near genesis.
//!   Checkpoints pin known-good blocks; a branch that disagrees at any
//!   checkpoint height is rejected, and a reorg that would fork below the
//!   trust anchor is refused.
//!
//! - **Checkpoint spoofing:** The checkpoint list is compiled into the binary.
//!   An attacker would need to distribute a modified binary to exploit this,
//!   which is outside our threat model.
//!
//! # Usage
//!
//! Build one registry at startup from the configured [`NetworkType`] and share
//! it by reference or `Arc`; it never changes afterwards. The chain manager
//! calls [`CheckpointRegistry::validate_block`] (or
//! [`CheckpointRegistry::check_block`]) when connecting a block whose height
//! is known, and [`CheckpointRegistry::check_fork_point`] before accepting a
//! reorg. Testnet carries no checkpoints, so every query is permissive there.

use keel_core::block_index::{BlockIndex, BlockIndexNode};
use keel_core::constants::{MAINNET_CHECKPOINTS, NetworkType, TESTNET_CHECKPOINTS};
use keel_core::error::{BlockError, CheckpointError};
use keel_core::types::Hash256;
use tracing::{debug, warn};

/// A trusted (height, hash) pair pinning the canonical chain at `height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CheckpointEntry {
    pub height: u64,
    pub hash: Hash256,
}

impl CheckpointEntry {
    pub const fn new(height: u64, hash: Hash256) -> Self {
        Self { height, hash }
    }
}

impl From<(u64, [u8; 32])> for CheckpointEntry {
    fn from((height, hash): (u64, [u8; 32])) -> Self {
        Self::new(height, Hash256(hash))
    }
}

impl From<(u64, Hash256)> for CheckpointEntry {
    fn from((height, hash): (u64, Hash256)) -> Self {
        Self::new(height, hash)
    }
}

/// Immutable checkpoint table for one network profile.
///
/// Entries are kept sorted by ascending height with unique heights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckpointRegistry {
    network: NetworkType,
    entries: Vec<CheckpointEntry>,
}

impl CheckpointRegistry {
    /// Registry with the hard-coded table for `network`.
    pub fn new(network: NetworkType) -> Self {
        let table = match network {
            NetworkType::Mainnet => MAINNET_CHECKPOINTS,
            NetworkType::Testnet => TESTNET_CHECKPOINTS,
        };
        let entries: Vec<CheckpointEntry> = table.iter().copied().map(Into::into).collect();
        debug!(
            network = %network,
            checkpoints = entries.len(),
            "checkpoint registry initialised"
        );
        Self { network, entries }
    }

    /// Registry over an explicit checkpoint list.
    ///
    /// Entries may arrive in any order; they are sorted by height. On
    /// [`NetworkType::Testnet`] the list is ignored and the table is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CheckpointError::DuplicateHeight`] if two entries share a height.
    pub fn from_entries<I, E>(network: NetworkType, entries: I) -> Result<Self, CheckpointError>
    where
        I: IntoIterator<Item = E>,
        E: Into<CheckpointEntry>,
    {
        if network.is_testnet() {
            return Ok(Self {
                network,
                entries: Vec::new(),
            });
        }

        let mut entries: Vec<CheckpointEntry> = entries.into_iter().map(Into::into).collect();
        entries.sort_by_key(|e| e.height);
        if let Some(pair) = entries.windows(2).find(|w| w[0].height == w[1].height) {
            return Err(CheckpointError::DuplicateHeight(pair[0].height));
        }
        Ok(Self { network, entries })
    }

    /// Network profile this registry was built for.
    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// All checkpoints, ascending by height.
    pub fn entries(&self) -> &[CheckpointEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The checkpoint at exactly `height`, if any.
    pub fn checkpoint_at(&self, height: u64) -> Option<&CheckpointEntry> {
        self.entries
            .binary_search_by_key(&height, |e| e.height)
            .ok()
            .map(|i| &self.entries[i])
    }

    /// The highest-height checkpoint, if any.
    pub fn last_checkpoint(&self) -> Option<&CheckpointEntry> {
        self.entries.last()
    }

    /// Whether a block with `hash` at `height` agrees with the checkpoint table.
    ///
    /// Heights without a checkpoint are unconstrained and always pass. On
    /// testnet every block passes.
    pub fn validate_block(&self, height: u64, hash: &Hash256) -> bool {
        if self.network.is_testnet() {
            return true;
        }
        match self.checkpoint_at(height) {
            Some(cp) => cp.hash == *hash,
            None => true,
        }
    }

    /// Like [`validate_block`](Self::validate_block) but reports the mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::CheckpointMismatch`] exactly when `validate_block`
    /// would return `false`.
    pub fn check_block(&self, height: u64, hash: &Hash256) -> Result<(), BlockError> {
        if self.validate_block(height, hash) {
            return Ok(());
        }
        // validate_block only fails when a checkpoint exists at `height`.
        let expected = self
            .checkpoint_at(height)
            .map(|cp| cp.hash)
            .unwrap_or_default();
        warn!(height, %expected, got = %hash, "block rejected by checkpoint");
        Err(BlockError::CheckpointMismatch {
            height,
            expected,
            got: *hash,
        })
    }

    /// Lower-bound estimate of the total chain height: the highest checkpoint
    /// height, or 0 on testnet or with an empty table.
    pub fn total_blocks_estimate(&self) -> u64 {
        if self.network.is_testnet() {
            return 0;
        }
        self.last_checkpoint().map_or(0, |cp| cp.height)
    }

    /// The block-index node of the highest checkpoint present in `index`.
    ///
    /// Scans from the highest checkpoint downward and returns on the first hit,
    /// so a node that has not yet synced the later checkpoints falls back to
    /// the most recent one it has. Returns `None` on testnet or when no
    /// checkpoint hash is known locally.
    pub fn last_checkpoint_present_in<'a, I>(&self, index: &'a I) -> Option<&'a BlockIndexNode>
    where
        I: BlockIndex + ?Sized,
    {
        if self.network.is_testnet() {
            return None;
        }
        self.entries.iter().rev().find_map(|cp| index.get(&cp.hash))
    }

    /// Refuse a reorg whose last common ancestor lies below the trust anchor.
    ///
    /// `fork_height` is the height of the block the alternate branch builds on.
    /// A branch forking at the anchor itself keeps the anchor and is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::ForkBelowCheckpoint`] when an anchor is present in
    /// `index` and `fork_height` is below its height.
    pub fn check_fork_point<I>(&self, fork_height: u64, index: &I) -> Result<(), BlockError>
    where
        I: BlockIndex + ?Sized,
    {
        let Some(anchor) = self.last_checkpoint_present_in(index) else {
            return Ok(());
        };
        if fork_height < anchor.height {
            warn!(
                fork_height,
                anchor_height = anchor.height,
                anchor = %anchor.hash,
                "reorg refused below checkpoint"
            );
            return Err(BlockError::ForkBelowCheckpoint {
                fork_height,
                anchor_height: anchor.height,
            });
        }
        Ok(())
    }
}
