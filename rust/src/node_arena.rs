//! Node arena: a single 1-indexed slot array with an intrusive free list.
//! Slot 0 is a permanent sentinel so that `NULL_NODE` can be read like an
//! empty subtree (height 0, no descendants).

use crate::error::{AvlTreeError, InitResult, TreeResult};
use crate::types::{ArenaTreeMap, Key, Node, NodeId, Value, MIN_CAPACITY, NULL_NODE};
use std::ops::{Index, IndexMut};
use tracing::debug;

/// Statistics for a node arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeArenaStats {
    pub capacity: usize,
    pub occupied: usize,
    pub free: usize,
    pub utilization: f64,
}

/// Growable slot storage for tree nodes
#[derive(Debug, Clone)]
pub struct NodeArena {
    /// `capacity + 1` slots; index 0 is the sentinel.
    slots: Vec<Node>,
    /// Head of the free list, `NULL_NODE` when every slot is occupied.
    free_head: NodeId,
}

impl NodeArena {
    /// Create an arena with `capacity` free slots.
    pub fn new(capacity: usize) -> InitResult<Self> {
        if capacity < MIN_CAPACITY {
            return Err(AvlTreeError::invalid_capacity(capacity, MIN_CAPACITY));
        }
        let mut arena = Self {
            slots: vec![Node::default(); capacity + 1],
            free_head: NULL_NODE,
        };
        arena.clear();
        Ok(arena)
    }

    /// Number of usable slots (excludes the sentinel).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    /// Returns true if no free slot is left.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_head == NULL_NODE
    }

    /// Pop the head of the free list and initialize it as an occupied leaf.
    #[inline]
    pub fn procure(&mut self, key: Key, value: Value) -> TreeResult<NodeId> {
        let id = self.free_head;
        if id == NULL_NODE {
            return Err(AvlTreeError::ArenaExhausted);
        }
        self.free_head = self.slots[id].next_free();
        self.slots[id].occupy(key, value);
        Ok(id)
    }

    /// Push an occupied slot back onto the free list.
    #[inline]
    pub fn release(&mut self, id: NodeId) -> TreeResult<()> {
        if !self.contains(id) {
            return Err(AvlTreeError::InvalidNode(id));
        }
        self.slots[id].vacate(self.free_head);
        self.free_head = id;
        Ok(())
    }

    /// Double the capacity. Existing slots keep their indices; the new slots
    /// are threaded onto the front of the free list in ascending order.
    pub fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity * 2;

        let mut slots = Vec::with_capacity(new_capacity + 1);
        slots.extend_from_slice(&self.slots);
        slots.resize(new_capacity + 1, Node::default());
        self.slots = slots;

        let first_new = old_capacity + 1;
        for id in first_new..new_capacity {
            self.slots[id].vacate(id + 1);
        }
        self.slots[new_capacity].vacate(self.free_head);
        self.free_head = first_new;

        debug!(old_capacity, new_capacity, "node arena grown");
    }

    /// Mark every slot free, keeping the current capacity.
    pub fn clear(&mut self) {
        let capacity = self.capacity();
        self.slots[NULL_NODE] = Node::default();
        for id in 1..capacity {
            self.slots[id].vacate(id + 1);
        }
        self.slots[capacity].vacate(NULL_NODE);
        self.free_head = 1;
    }

    /// Get an occupied node
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id).filter(|node| id != NULL_NODE && node.occupied)
    }

    /// Check if an index refers to an occupied slot
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Head of the free list
    pub fn free_head(&self) -> NodeId {
        self.free_head
    }

    /// Iterate over the free list, stopping early if it revisits a slot.
    pub fn free_slots(&self) -> FreeSlots<'_> {
        FreeSlots {
            arena: self,
            next: self.free_head,
            remaining: self.capacity(),
        }
    }

    /// Get the number of slots on the free list
    pub fn free_count(&self) -> usize {
        self.free_slots().count()
    }

    /// Get the number of occupied slots
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().skip(1).filter(|node| node.occupied).count()
    }

    /// Get arena statistics
    pub fn stats(&self) -> NodeArenaStats {
        let capacity = self.capacity();
        let occupied = self.occupied_count();
        NodeArenaStats {
            capacity,
            occupied,
            free: self.free_count(),
            utilization: occupied as f64 / capacity as f64,
        }
    }

    // ========================================================================
    // METADATA HELPERS
    // ========================================================================

    /// Cached height of a subtree; 0 for `NULL_NODE`.
    #[inline]
    pub fn height(&self, id: NodeId) -> u32 {
        if id == NULL_NODE {
            0
        } else {
            self.slots[id].height
        }
    }

    /// Number of nodes in a subtree including its root; 0 for `NULL_NODE`.
    #[inline]
    pub fn weight(&self, id: NodeId) -> usize {
        if id == NULL_NODE {
            0
        } else {
            1 + self.slots[id].subtree_count
        }
    }

    /// Left height minus right height.
    #[inline]
    pub fn balance_factor(&self, id: NodeId) -> i64 {
        let node = &self.slots[id];
        i64::from(self.height(node.left)) - i64::from(self.height(node.right))
    }

    /// Recompute a node's height from its children's cached heights.
    #[inline]
    pub fn update_height(&mut self, id: NodeId) {
        let (left, right) = (self.slots[id].left, self.slots[id].right);
        self.slots[id].height = 1 + self.height(left).max(self.height(right));
    }

    /// Recompute a node's subtree count from its children's cached counts.
    #[inline]
    pub fn update_count(&mut self, id: NodeId) {
        let (left, right) = (self.slots[id].left, self.slots[id].right);
        self.slots[id].subtree_count = self.weight(left) + self.weight(right);
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.slots[id]
    }
}

impl IndexMut<NodeId> for NodeArena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.slots[id]
    }
}

/// Iterator over free slot indices
pub struct FreeSlots<'a> {
    arena: &'a NodeArena,
    next: NodeId,
    remaining: usize,
}

impl Iterator for FreeSlots<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.next == NULL_NODE || self.remaining == 0 {
            return None;
        }
        let id = self.next;
        self.remaining -= 1;
        self.next = self.arena.slots.get(id).map_or(NULL_NODE, Node::next_free);
        Some(id)
    }
}

// ============================================================================
// ARENATREEMAP ARENA HELPERS
// ============================================================================

impl<B> ArenaTreeMap<B> {
    /// Number of slots in the backing array.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Get statistics for the node arena.
    pub fn arena_stats(&self) -> NodeArenaStats {
        self.arena.stats()
    }

    /// Get the number of slots on the free list.
    pub fn free_slot_count(&self) -> usize {
        self.arena.free_count()
    }

    /// Read-only access to an occupied node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    /// Index of the root node, `NULL_NODE` when empty.
    pub fn root_id(&self) -> NodeId {
        self.root
    }
}
