//! Construction and initialization logic for ArenaTreeMap.
//!
//! This module contains capacity validation, arena initialization, the
//! `Default` implementation, and linear-time bulk construction from sorted
//! key/value pairs.

use crate::config::TreeConfig;
use crate::error::{AvlTreeError, InitResult, TreeResult};
use crate::node_arena::NodeArena;
use crate::rebalance::Balancer;
use crate::types::{ArenaTreeMap, KvPair, NodeId, DEFAULT_CAPACITY, MIN_CAPACITY, NULL_NODE};
use std::marker::PhantomData;
use tracing::debug;

impl<B: Balancer> ArenaTreeMap<B> {
    /// Create an empty tree with `capacity` preallocated slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let tree = AvlTreeMap::new(8).unwrap();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.capacity(), 8);
    /// ```
    pub fn new(capacity: usize) -> InitResult<Self> {
        Self::with_config(TreeConfig::new(capacity))
    }

    /// Create an empty tree with `DEFAULT_CAPACITY` slots.
    pub fn with_default_capacity() -> InitResult<Self> {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Create an empty tree from explicit options.
    ///
    /// ```
    /// use avltree::{AvlTreeMap, TreeConfig};
    ///
    /// let mut tree = AvlTreeMap::with_config(TreeConfig::new(1).verifying()).unwrap();
    /// tree.insert(1, 1).unwrap();
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn with_config(config: TreeConfig) -> InitResult<Self> {
        config.validate()?;
        Ok(Self {
            arena: NodeArena::new(config.initial_capacity)?,
            root: NULL_NODE,
            config,
            balancer: PhantomData,
        })
    }

    /// Build a balanced tree from pairs sorted by strictly ascending key.
    ///
    /// Each sub-range is rooted at its middle element, so the result is
    /// height-balanced without any rotations. Runs in O(n).
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let tree = AvlTreeMap::bulk_build(&[(1, 10), (2, 20), (3, 30)]).unwrap();
    /// assert_eq!(tree.to_vec(), vec![(1, 10), (2, 20), (3, 30)]);
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn bulk_build(pairs: &[KvPair]) -> InitResult<Self> {
        Self::bulk_build_with_config(pairs, TreeConfig::new(MIN_CAPACITY))
    }

    /// Bulk build with explicit options. The arena gets twice as many slots
    /// as there are pairs, or `config.initial_capacity` if that is larger.
    pub fn bulk_build_with_config(pairs: &[KvPair], config: TreeConfig) -> InitResult<Self> {
        if let Some(pos) = pairs.windows(2).position(|w| w[0].0 >= w[1].0) {
            return Err(AvlTreeError::UnsortedInput { index: pos + 1 });
        }

        let capacity = (pairs.len() * 2).max(config.initial_capacity);
        let mut tree = Self::with_config(config.with_initial_capacity(capacity))?;
        tree.root = tree.build_range(pairs, 0, pairs.len())?;

        debug!(len = pairs.len(), capacity, "bulk built tree");
        tree.verify_after("bulk build")?;
        Ok(tree)
    }

    /// Build `pairs[start..end]` and return the index of its root.
    fn build_range(&mut self, pairs: &[KvPair], start: usize, end: usize) -> TreeResult<NodeId> {
        if start == end {
            return Ok(NULL_NODE);
        }
        let mid = start + (end - start) / 2;
        let (key, value) = pairs[mid];
        let id = self.arena.procure(key, value)?;

        let left = self.build_range(pairs, start, mid)?;
        let right = self.build_range(pairs, mid + 1, end)?;
        self.arena[id].left = left;
        self.arena[id].right = right;
        self.arena.update_height(id);
        self.arena.update_count(id);
        Ok(id)
    }

    /// The options this tree was created with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }
}

impl<B: Balancer> Default for ArenaTreeMap<B> {
    /// Create a tree with default capacity.
    fn default() -> Self {
        Self::with_default_capacity().expect("DEFAULT_CAPACITY is a valid capacity")
    }
}
