//! Block index interface and in-memory implementation.
//!
//! The block index (hash → node) is owned and mutated by the chain manager.
//! Checkpoint queries only ever read it through the [`BlockIndex`] trait.
//! [`MemoryBlockIndex`] is suitable for testing and tooling; a production
//! node backs the trait with its own storage.

use std::collections::HashMap;

use crate::types::Hash256;

/// A known block and its position in the chain graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockIndexNode {
    /// Header hash of this block.
    pub hash: Hash256,
    /// Header hash of the parent block. [`Hash256::ZERO`] for genesis.
    pub prev_hash: Hash256,
    /// Height above genesis.
    pub height: u64,
}

impl BlockIndexNode {
    pub fn new(hash: Hash256, prev_hash: Hash256, height: u64) -> Self {
        Self {
            hash,
            prev_hash,
            height,
        }
    }

    /// Whether this node has no parent.
    pub fn is_genesis(&self) -> bool {
        self.prev_hash.is_zero()
    }
}

/// Read-only view of a block index keyed by block hash.
///
/// Implementations must return a consistent view for the lifetime of the
/// borrow; callers that scan several hashes rely on that.
pub trait BlockIndex {
    /// Look up a node by block hash.
    fn get(&self, hash: &Hash256) -> Option<&BlockIndexNode>;

    /// Whether the index knows `hash`.
    ///
    /// Default implementation delegates to [`get`](Self::get).
    fn contains(&self, hash: &Hash256) -> bool {
        self.get(hash).is_some()
    }
}

impl BlockIndex for HashMap<Hash256, BlockIndexNode> {
    fn get(&self, hash: &Hash256) -> Option<&BlockIndexNode> {
        HashMap::get(self, hash)
    }
}

/// In-memory block index.
#[derive(Clone, Debug, Default)]
pub struct MemoryBlockIndex {
    nodes: HashMap<Hash256, BlockIndexNode>,
}

impl MemoryBlockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, returning the previous node stored under the same hash.
    pub fn insert(&mut self, node: BlockIndexNode) -> Option<BlockIndexNode> {
        self.nodes.insert(node.hash, node)
    }

    /// Build a linear chain from consecutive block hashes starting at height 0.
    pub fn from_chain(hashes: &[Hash256]) -> Self {
        let mut index = Self::new();
        let mut prev = Hash256::ZERO;
        for (height, hash) in hashes.iter().enumerate() {
            index.insert(BlockIndexNode::new(*hash, prev, height as u64));
            prev = *hash;
        }
        index
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk parent links from `hash` until a node at `height` is reached.
    ///
    /// Returns `None` if `hash` is unknown, `height` is above the start node,
    /// or an ancestor is missing from the index.
    pub fn ancestor_at(&self, hash: &Hash256, height: u64) -> Option<&BlockIndexNode> {
        let mut node = self.nodes.get(hash)?;
        while node.height > height {
            let parent = self.nodes.get(&node.prev_hash)?;
            // Heights must strictly decrease along parent links.
            if parent.height >= node.height {
                return None;
            }
            node = parent;
        }
        (node.height == height).then_some(node)
    }
}

impl BlockIndex for MemoryBlockIndex {
    fn get(&self, hash: &Hash256) -> Option<&BlockIndexNode> {
        self.nodes.get(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(seed: u8) -> Hash256 {
        Hash256([seed; 32])
    }

    #[test]
    fn empty_index_contains_nothing() {
        let index = MemoryBlockIndex::new();
        assert!(index.is_empty());
        assert!(!index.contains(&h(1)));
        assert!(index.get(&h(1)).is_none());
    }

    #[test]
    fn insert_and_get() {
        let mut index = MemoryBlockIndex::new();
        let node = BlockIndexNode::new(h(1), Hash256::ZERO, 0);
        assert!(index.insert(node.clone()).is_none());
        assert_eq!(index.get(&h(1)), Some(&node));
        assert!(index.contains(&h(1)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn insert_same_hash_replaces() {
        let mut index = MemoryBlockIndex::new();
        index.insert(BlockIndexNode::new(h(1), Hash256::ZERO, 0));
        let old = index.insert(BlockIndexNode::new(h(1), h(9), 5));
        assert_eq!(old.map(|n| n.height), Some(0));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn from_chain_links_parents() {
        let index = MemoryBlockIndex::from_chain(&[h(1), h(2), h(3)]);
        let genesis = index.get(&h(1)).unwrap();
        assert!(genesis.is_genesis());
        assert_eq!(genesis.height, 0);

        let tip = index.get(&h(3)).unwrap();
        assert_eq!(tip.height, 2);
        assert_eq!(tip.prev_hash, h(2));
        assert!(!tip.is_genesis());
    }

    #[test]
    fn ancestor_at_walks_back() {
        let index = MemoryBlockIndex::from_chain(&[h(1), h(2), h(3), h(4)]);
        assert_eq!(index.ancestor_at(&h(4), 1).map(|n| n.hash), Some(h(2)));
        assert_eq!(index.ancestor_at(&h(4), 3).map(|n| n.hash), Some(h(4)));
        assert!(index.ancestor_at(&h(2), 3).is_none());
        assert!(index.ancestor_at(&h(99), 0).is_none());
    }

    #[test]
    fn hashmap_implements_block_index() {
        let mut map: HashMap<Hash256, BlockIndexNode> = HashMap::new();
        map.insert(h(7), BlockIndexNode::new(h(7), Hash256::ZERO, 0));
        assert!(BlockIndex::contains(&map, &h(7)));
        assert!(!BlockIndex::contains(&map, &h(8)));
    }
}
