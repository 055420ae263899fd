//! Node slot implementation.
//!
//! A slot flips between two roles: an occupied tree node, or a link in the
//! arena's free list. These methods perform the role changes and expose the
//! fields read by callers outside the crate.

use crate::types::{Key, Node, NodeId, Value, NULL_NODE};

impl Node {
    /// Turn this slot into a fresh occupied leaf.
    #[inline]
    pub(crate) fn occupy(&mut self, key: Key, value: Value) {
        *self = Node {
            key,
            value,
            left: NULL_NODE,
            right: NULL_NODE,
            height: 1,
            subtree_count: 0,
            occupied: true,
        };
    }

    /// Turn this slot into a free-list link pointing at `next_free`.
    #[inline]
    pub(crate) fn vacate(&mut self, next_free: NodeId) {
        *self = Node {
            left: next_free,
            ..Node::default()
        };
    }

    /// Next slot on the free list. Only meaningful while unoccupied.
    #[inline]
    pub(crate) fn next_free(&self) -> NodeId {
        self.left
    }

    /// The node's key.
    pub fn key(&self) -> Key {
        self.key
    }

    /// The node's value.
    pub fn value(&self) -> Value {
        self.value
    }

    /// Left child index, `NULL_NODE` if none.
    pub fn left(&self) -> NodeId {
        self.left
    }

    /// Right child index, `NULL_NODE` if none.
    pub fn right(&self) -> NodeId {
        self.right
    }

    /// Cached height of the subtree rooted at this node.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cached number of descendants.
    pub fn subtree_count(&self) -> usize {
        self.subtree_count
    }

    /// Returns true if this slot holds a live entry.
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left == NULL_NODE && self.right == NULL_NODE
    }
}
