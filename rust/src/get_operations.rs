//! GET operations for ArenaTreeMap.
//!
//! This module contains the read-only lookups: probe-counting search, plain
//! value retrieval, and access to the smallest and largest entries.

use crate::error::{AvlTreeError, KeyResult};
use crate::types::{ArenaTreeMap, Key, KvPair, Lookup, Node, NodeId, Value, NULL_NODE};
use std::cmp::Ordering;

impl<B> ArenaTreeMap<B> {
    // ============================================================================
    // PUBLIC GET OPERATIONS
    // ============================================================================

    /// Look up `key`, counting the nodes visited on the way down.
    ///
    /// The tree is never modified. An empty tree answers with zero probes.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let mut tree = AvlTreeMap::new(4).unwrap();
    /// tree.insert(2, 20).unwrap();
    /// tree.insert(1, 10).unwrap();
    ///
    /// let hit = tree.search(1);
    /// assert_eq!(hit.value, Some(10));
    /// assert_eq!(hit.probes, 2);
    ///
    /// let miss = tree.search(3);
    /// assert!(miss.signed_probes() < 0);
    /// ```
    pub fn search(&self, key: Key) -> Lookup {
        let mut probes = 0;
        let mut current = self.root;
        while current != NULL_NODE {
            probes += 1;
            let node = &self.arena[current];
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
                Ordering::Equal => return Lookup::found(node.value, probes),
            }
        }
        Lookup::missing(probes)
    }

    /// Get the value associated with a key.
    pub fn get(&self, key: Key) -> Option<Value> {
        self.search(key).value
    }

    /// Check if key exists in the tree.
    pub fn contains_key(&self, key: Key) -> bool {
        self.search(key).is_found()
    }

    /// Get the value for a key, returning `KeyNotFound` if it is absent.
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let mut tree = AvlTreeMap::new(4).unwrap();
    /// tree.insert(1, 11).unwrap();
    /// assert_eq!(tree.get_item(1).unwrap(), 11);
    /// assert!(tree.get_item(2).is_err());
    /// ```
    pub fn get_item(&self, key: Key) -> KeyResult<Value> {
        self.get(key).ok_or(AvlTreeError::KeyNotFound)
    }

    /// Returns the entry with the smallest key.
    pub fn first(&self) -> Option<KvPair> {
        self.extreme(|node| node.left)
    }

    /// Returns the entry with the largest key.
    pub fn last(&self) -> Option<KvPair> {
        self.extreme(|node| node.right)
    }

    fn extreme(&self, step: impl Fn(&Node) -> NodeId) -> Option<KvPair> {
        if self.root == NULL_NODE {
            return None;
        }
        let mut current = self.root;
        loop {
            let node = &self.arena[current];
            match step(node) {
                NULL_NODE => return Some((node.key, node.value)),
                next => current = next,
            }
        }
    }
}
