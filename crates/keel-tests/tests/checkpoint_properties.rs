//! Property-based tests for checkpoint lock-in.
//!
//! Attack vectors tested:
//! - Substituting any other hash at a checkpoint height
//! - Arbitrary blocks at unconstrained heights
//! - Testnet permissiveness
//! - Anchor selection over arbitrary subsets of synced checkpoints
//! - Reorg refusal below the anchor

use proptest::prelude::*;

use keel_consensus::checkpoint::CheckpointRegistry;
use keel_consensus::progress::estimated_network_height;
use keel_core::constants::{MAINNET_CHECKPOINTS, NetworkType};
use keel_core::error::BlockError;
use keel_core::types::Hash256;
use keel_tests::helpers::{index_with_checkpoints, mainnet_checkpoint};

fn mainnet() -> CheckpointRegistry {
    CheckpointRegistry::new(NetworkType::Mainnet)
}

fn arb_hash() -> impl Strategy<Value = Hash256> {
    any::<[u8; 32]>().prop_map(Hash256)
}

fn arb_checkpoint_index() -> impl Strategy<Value = usize> {
    0..MAINNET_CHECKPOINTS.len()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn any_other_hash_at_checkpoint_is_rejected(i in arb_checkpoint_index(), forged in arb_hash()) {
        let (height, pinned) = mainnet_checkpoint(i);
        prop_assume!(forged != pinned);
        let reg = mainnet();
        prop_assert!(!reg.validate_block(height, &forged));
        let rejected = matches!(
            reg.check_block(height, &forged),
            Err(BlockError::CheckpointMismatch { .. })
        );
        prop_assert!(rejected);
    }

    #[test]
    fn unconstrained_heights_accept_anything(height in any::<u64>(), h in arb_hash()) {
        let reg = mainnet();
        prop_assume!(reg.checkpoint_at(height).is_none());
        prop_assert!(reg.validate_block(height, &h));
    }

    #[test]
    fn testnet_accepts_anything(height in any::<u64>(), h in arb_hash()) {
        let reg = CheckpointRegistry::new(NetworkType::Testnet);
        prop_assert!(reg.validate_block(height, &h));
        prop_assert_eq!(reg.total_blocks_estimate(), 0);
    }

    #[test]
    fn check_block_agrees_with_validate_block(height in 0u64..30_000, h in arb_hash()) {
        let reg = mainnet();
        prop_assert_eq!(reg.validate_block(height, &h), reg.check_block(height, &h).is_ok());
    }

    #[test]
    fn anchor_is_max_present_checkpoint(
        present in proptest::sample::subsequence(
            (0..MAINNET_CHECKPOINTS.len()).collect::<Vec<_>>(),
            0..=MAINNET_CHECKPOINTS.len(),
        )
    ) {
        let index = index_with_checkpoints(&present);
        let reg = mainnet();

        let anchor = reg.last_checkpoint_present_in(&index);
        match present.iter().max() {
            Some(&top) => {
                let (height, hash) = mainnet_checkpoint(top);
                let anchor = anchor.expect("a checkpoint is present");
                prop_assert_eq!(anchor.height, height);
                prop_assert_eq!(anchor.hash, hash);
            }
            None => prop_assert!(anchor.is_none()),
        }
    }

    #[test]
    fn fork_refused_iff_below_anchor(top in arb_checkpoint_index(), fork_height in 0u64..30_000) {
        let index = index_with_checkpoints(&[0, top]);
        let reg = mainnet();
        let (anchor_height, _) = mainnet_checkpoint(top);
        let result = reg.check_fork_point(fork_height, &index);
        prop_assert_eq!(result.is_err(), fork_height < anchor_height);
    }

    #[test]
    fn network_height_never_below_checkpoints(peers in proptest::collection::vec(any::<u64>(), 0..32)) {
        let reg = mainnet();
        prop_assert!(estimated_network_height(&reg, &peers) >= reg.total_blocks_estimate());
    }
}
