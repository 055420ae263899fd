//! Iterator implementations for ArenaTreeMap.
//!
//! In-order traversal uses an explicit stack of pending ancestors, so
//! iterating never recurses and holds at most `height()` indices.

use crate::node_arena::NodeArena;
use crate::types::{ArenaTreeMap, Key, KvPair, NodeId, Value, NULL_NODE};

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Iterator over key-value pairs in ascending key order.
pub struct ItemIterator<'a> {
    arena: &'a NodeArena,
    stack: Vec<NodeId>,
    remaining: usize,
}

/// Iterator over keys in ascending order.
pub struct KeyIterator<'a> {
    items: ItemIterator<'a>,
}

/// Iterator over values in key order.
pub struct ValueIterator<'a> {
    items: ItemIterator<'a>,
}

// ============================================================================
// ARENATREEMAP ITERATOR METHODS
// ============================================================================

impl<B> ArenaTreeMap<B> {
    /// Returns an iterator over all key-value pairs in sorted order.
    pub fn iter(&self) -> ItemIterator<'_> {
        ItemIterator::new(&self.arena, self.root, self.len())
    }

    /// Returns an iterator over all keys in sorted order.
    pub fn keys(&self) -> KeyIterator<'_> {
        KeyIterator { items: self.iter() }
    }

    /// Returns an iterator over all values in key order.
    pub fn values(&self) -> ValueIterator<'_> {
        ValueIterator { items: self.iter() }
    }

    /// Returns all key-value pairs as a vector.
    pub fn to_vec(&self) -> Vec<KvPair> {
        self.iter().collect()
    }
}

impl<'a, B> IntoIterator for &'a ArenaTreeMap<B> {
    type Item = KvPair;
    type IntoIter = ItemIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// ITEMITERATOR IMPLEMENTATION
// ============================================================================

impl<'a> ItemIterator<'a> {
    fn new(arena: &'a NodeArena, root: NodeId, len: usize) -> Self {
        let mut iter = Self {
            arena,
            stack: Vec::with_capacity(arena.height(root) as usize),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut id: NodeId) {
        while id != NULL_NODE {
            self.stack.push(id);
            id = self.arena[id].left;
        }
    }
}

impl Iterator for ItemIterator<'_> {
    type Item = KvPair;

    fn next(&mut self) -> Option<KvPair> {
        let id = self.stack.pop()?;
        let arena = self.arena;
        let node = &arena[id];
        self.push_left_spine(node.right);
        self.remaining = self.remaining.saturating_sub(1);
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ItemIterator<'_> {}

impl Iterator for KeyIterator<'_> {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        self.items.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl Iterator for ValueIterator<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.items.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}
