//! Range query operations for ArenaTreeMap.
//!
//! This module contains ordered-neighbor lookups, bounded range iteration,
//! range sums, and rank queries answered from cached subtree counts.

use crate::node_arena::NodeArena;
use crate::types::{ArenaTreeMap, Key, KvPair, NodeId, NULL_NODE};
use std::ops::{Bound, RangeBounds};

/// Iterator over the key-value pairs whose keys fall inside a range.
pub struct RangeIterator<'a> {
    arena: &'a NodeArena,
    stack: Vec<NodeId>,
    end: Bound<Key>,
}

// ============================================================================
// RANGE QUERY OPERATIONS
// ============================================================================

impl<B> ArenaTreeMap<B> {
    /// Returns an iterator over key-value pairs in a range using Rust's range syntax.
    ///
    /// Subtrees entirely below the start bound are never visited, and
    /// iteration stops at the first key past the end bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let pairs: Vec<(u64, u64)> = (0..10).map(|k| (k, k * 10)).collect();
    /// let tree = AvlTreeMap::bulk_build(&pairs).unwrap();
    ///
    /// let keys: Vec<u64> = tree.range(3..7).map(|(k, _)| k).collect();
    /// assert_eq!(keys, vec![3, 4, 5, 6]);
    ///
    /// let keys: Vec<u64> = tree.range(7..).map(|(k, _)| k).collect();
    /// assert_eq!(keys, vec![7, 8, 9]);
    ///
    /// let keys: Vec<u64> = tree.range(..=1).map(|(k, _)| k).collect();
    /// assert_eq!(keys, vec![0, 1]);
    /// ```
    pub fn range<R>(&self, range: R) -> RangeIterator<'_>
    where
        R: RangeBounds<Key>,
    {
        let start = range.start_bound().cloned();
        let end = range.end_bound().cloned();

        let mut stack = Vec::with_capacity(self.height() as usize);
        let mut id = self.root;
        while id != NULL_NODE {
            let node = &self.arena[id];
            let after_start = match start {
                Bound::Included(lo) => node.key >= lo,
                Bound::Excluded(lo) => node.key > lo,
                Bound::Unbounded => true,
            };
            if after_start {
                stack.push(id);
                id = node.left;
            } else {
                id = node.right;
            }
        }

        RangeIterator {
            arena: &self.arena,
            stack,
            end,
        }
    }

    /// Sum of the values whose keys lie in `lo..=hi`. Zero when `lo > hi`.
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let tree = AvlTreeMap::bulk_build(&[(1, 5), (4, 6), (9, 7)]).unwrap();
    /// assert_eq!(tree.range_sum(2, 9), 13);
    /// assert_eq!(tree.range_sum(9, 2), 0);
    /// ```
    pub fn range_sum(&self, lo: Key, hi: Key) -> u128 {
        if lo > hi {
            return 0;
        }
        self.range(lo..=hi).map(|(_, v)| u128::from(v)).sum()
    }

    /// Entry with the smallest key strictly greater than `key`.
    pub fn successor(&self, key: Key) -> Option<KvPair> {
        let mut best = None;
        let mut id = self.root;
        while id != NULL_NODE {
            let node = &self.arena[id];
            if node.key > key {
                best = Some((node.key, node.value));
                id = node.left;
            } else {
                id = node.right;
            }
        }
        best
    }

    /// Entry with the largest key strictly less than `key`.
    pub fn predecessor(&self, key: Key) -> Option<KvPair> {
        let mut best = None;
        let mut id = self.root;
        while id != NULL_NODE {
            let node = &self.arena[id];
            if node.key < key {
                best = Some((node.key, node.value));
                id = node.right;
            } else {
                id = node.left;
            }
        }
        best
    }

    /// Number of keys strictly less than `key`, in O(height).
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let tree = AvlTreeMap::bulk_build(&[(10, 0), (20, 0), (30, 0)]).unwrap();
    /// assert_eq!(tree.rank(5), 0);
    /// assert_eq!(tree.rank(20), 1);
    /// assert_eq!(tree.rank(31), 3);
    /// ```
    pub fn rank(&self, key: Key) -> usize {
        let mut rank = 0;
        let mut id = self.root;
        while id != NULL_NODE {
            let node = &self.arena[id];
            if key <= node.key {
                id = node.left;
            } else {
                rank += self.arena.weight(node.left) + 1;
                id = node.right;
            }
        }
        rank
    }
}

// ============================================================================
// RANGEITERATOR IMPLEMENTATION
// ============================================================================

impl Iterator for RangeIterator<'_> {
    type Item = KvPair;

    fn next(&mut self) -> Option<KvPair> {
        let id = self.stack.pop()?;
        let arena = self.arena;
        let node = &arena[id];

        let before_end = match self.end {
            Bound::Included(hi) => node.key <= hi,
            Bound::Excluded(hi) => node.key < hi,
            Bound::Unbounded => true,
        };
        if !before_end {
            self.stack.clear();
            return None;
        }

        let mut child = node.right;
        while child != NULL_NODE {
            self.stack.push(child);
            child = arena[child].left;
        }
        Some((node.key, node.value))
    }
}
