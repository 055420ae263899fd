//! Core types and data structures for ArenaTreeMap.
//!
//! This module contains the fundamental data structures, type definitions,
//! and constants used throughout the tree implementation.

use crate::config::TreeConfig;
use crate::node_arena::NodeArena;
use crate::rebalance::{Avl, Unbalanced};
use std::marker::PhantomData;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Minimum number of slots an arena may be created with
pub const MIN_CAPACITY: usize = 1;

/// Default number of slots for a new tree
pub const DEFAULT_CAPACITY: usize = 16;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Slot index into the node arena. Slots are 1-based.
pub type NodeId = usize;

/// Index meaning "no node". Slot 0 is never handed out.
pub const NULL_NODE: NodeId = 0;

/// Key type stored in the tree
pub type Key = u64;

/// Value type stored in the tree
pub type Value = u64;

/// A key/value pair, as produced by iteration and consumed by bulk build
pub type KvPair = (Key, Value);

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// One arena slot.
///
/// While occupied, `left`/`right` are child indices. While free, `left` holds
/// the index of the next free slot and every other field is zeroed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Node {
    pub(crate) key: Key,
    pub(crate) value: Value,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    /// Height of the subtree rooted here; a leaf is 1.
    pub(crate) height: u32,
    /// Number of descendants, not counting this node.
    pub(crate) subtree_count: usize,
    pub(crate) occupied: bool,
}

/// Ordered map from `u64` to `u64` stored in a flat, growable node arena.
///
/// The balancing strategy `B` decides what happens after each structural
/// change: [`Avl`] restores the AVL property with rotations, while
/// [`Unbalanced`] leaves the shape alone and behaves as a plain binary search
/// tree.
///
/// # Examples
///
/// ```
/// use avltree::AvlTreeMap;
///
/// let mut tree = AvlTreeMap::new(4).unwrap();
/// tree.insert(10, 100).unwrap();
/// tree.insert(20, 200).unwrap();
/// tree.insert(5, 50).unwrap();
///
/// assert_eq!(tree.search(20).value, Some(200));
/// assert_eq!(tree.remove(10).unwrap().value, Some(100));
/// assert_eq!(tree.len(), 2);
/// assert!(!tree.search(10).is_found());
/// ```
///
/// # Performance Characteristics
///
/// - **Insertion**: O(log n), amortized O(1) extra for arena growth
/// - **Lookup**: O(log n)
/// - **Deletion**: O(log n)
/// - **Bulk build from sorted input**: O(n)
/// - **Size**: O(1), read from the root's subtree count
#[derive(Debug, Clone)]
pub struct ArenaTreeMap<B = Avl> {
    /// Slot storage and free list.
    pub(crate) arena: NodeArena,
    /// Root slot, or `NULL_NODE` when empty.
    pub(crate) root: NodeId,
    /// Construction-time options.
    pub(crate) config: TreeConfig,
    pub(crate) balancer: PhantomData<B>,
}

/// Self-balancing tree; the default flavor.
pub type AvlTreeMap = ArenaTreeMap<Avl>;

/// Plain binary search tree without rebalancing.
pub type BstMap = ArenaTreeMap<Unbalanced>;

// ============================================================================
// OPERATION OUTCOMES
// ============================================================================

/// Result of a `search` or `remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    /// Value found (or removed), `None` when the key is absent.
    pub value: Option<Value>,
    /// Number of nodes visited during the descent.
    pub probes: usize,
}

impl Lookup {
    pub(crate) fn found(value: Value, probes: usize) -> Self {
        Self {
            value: Some(value),
            probes,
        }
    }

    pub(crate) fn missing(probes: usize) -> Self {
        Self {
            value: None,
            probes,
        }
    }

    /// Returns true if the key was present.
    pub fn is_found(&self) -> bool {
        self.value.is_some()
    }

    /// Probe count with the sign convention of the command layer:
    /// positive when found, negated when the key was absent.
    pub fn signed_probes(&self) -> i64 {
        let probes = self.probes as i64;
        if self.is_found() {
            probes
        } else {
            -probes
        }
    }
}

/// Result of an `insert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    /// Number of existing nodes visited, including the insertion point.
    pub probes: usize,
    /// Previous value when the key already existed.
    pub replaced: Option<Value>,
}

impl Insertion {
    /// Returns true if a new node was added.
    pub fn is_new(&self) -> bool {
        self.replaced.is_none()
    }
}
