//! Tree structure management operations for ArenaTreeMap.
//!
//! Size queries read the root's cached subtree count, so they are O(1).

use crate::types::{ArenaTreeMap, NULL_NODE};
use tracing::debug;

impl<B> ArenaTreeMap<B> {
    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.arena.weight(self.root)
    }

    /// Returns true if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.root == NULL_NODE
    }

    /// Height of the tree; 0 when empty.
    pub fn height(&self) -> u32 {
        self.arena.height(self.root)
    }

    /// Remove every entry, keeping the backing array and its capacity.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = NULL_NODE;
        debug!(capacity = self.arena.capacity(), "tree cleared");
    }
}
