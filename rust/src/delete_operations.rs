//! DELETE operations for ArenaTreeMap.
//!
//! This module contains key removal, the splice/replace logic for the removed
//! node, and extraction of the smallest or largest node of a subtree. Every
//! subtree root left on the unwinding path is refreshed and then passed to the
//! tree's `Balancer`.

use crate::error::{AvlTreeError, ModifyResult, TreeResult};
use crate::rebalance::Balancer;
use crate::types::{ArenaTreeMap, Key, KvPair, Lookup, NodeId, NULL_NODE};
use std::cmp::Ordering;

impl<B: Balancer> ArenaTreeMap<B> {
    /// Remove a key, returning its value and the number of nodes visited.
    ///
    /// Removing from an empty tree returns a miss with zero probes.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let mut tree = AvlTreeMap::bulk_build(&[(5, 50), (10, 100), (20, 200)]).unwrap();
    /// let removed = tree.remove(10).unwrap();
    /// assert_eq!(removed.value, Some(100));
    /// assert_eq!(tree.len(), 2);
    /// assert!(tree.remove(10).unwrap().signed_probes() < 0);
    /// ```
    pub fn remove(&mut self, key: Key) -> ModifyResult<Lookup> {
        let mut outcome = Lookup::missing(0);
        if self.root == NULL_NODE {
            return Ok(outcome);
        }

        self.root = self.remove_at(self.root, key, &mut outcome)?;

        self.verify_after("remove")?;
        Ok(outcome)
    }

    /// Remove and return the entry with the smallest key.
    pub fn pop_first(&mut self) -> ModifyResult<Option<KvPair>> {
        if self.root == NULL_NODE {
            return Ok(None);
        }
        let (root, min) = self.detach_min(self.root)?;
        self.root = root;
        self.finish_pop(min, "pop_first")
    }

    /// Remove and return the entry with the largest key.
    pub fn pop_last(&mut self) -> ModifyResult<Option<KvPair>> {
        if self.root == NULL_NODE {
            return Ok(None);
        }
        let (root, max) = self.detach_max(self.root)?;
        self.root = root;
        self.finish_pop(max, "pop_last")
    }

    fn finish_pop(&mut self, id: NodeId, operation: &str) -> ModifyResult<Option<KvPair>> {
        let pair = (self.arena[id].key, self.arena[id].value);
        self.arena.release(id)?;
        self.verify_after(operation)?;
        Ok(Some(pair))
    }

    fn remove_at(&mut self, subtree: NodeId, key: Key, outcome: &mut Lookup) -> TreeResult<NodeId> {
        if subtree == NULL_NODE {
            return Ok(NULL_NODE);
        }
        outcome.probes += 1;

        match key.cmp(&self.arena[subtree].key) {
            Ordering::Less => {
                let left = self.remove_at(self.arena[subtree].left, key, outcome)?;
                self.arena[subtree].left = left;
            }
            Ordering::Greater => {
                let right = self.remove_at(self.arena[subtree].right, key, outcome)?;
                self.arena[subtree].right = right;
            }
            Ordering::Equal => {
                outcome.value = Some(self.arena[subtree].value);
                let replacement = self.remove_node(subtree)?;
                return B::rebalance(&mut self.arena, replacement);
            }
        }

        if !outcome.is_found() {
            return Ok(subtree);
        }
        self.arena[subtree].subtree_count -= 1;
        self.arena.update_height(subtree);
        B::rebalance(&mut self.arena, subtree)
    }

    /// Unlink `id` from its subtree, release its slot, and return the index
    /// that takes its place.
    fn remove_node(&mut self, id: NodeId) -> TreeResult<NodeId> {
        let node = self.arena[id];
        let replacement = match (node.left, node.right) {
            (NULL_NODE, NULL_NODE) => NULL_NODE,
            (child, NULL_NODE) | (NULL_NODE, child) => child,
            (left, right) => {
                let (right, successor) = self.detach_min(right)?;
                self.arena[successor].left = left;
                self.arena[successor].right = right;
                self.arena[successor].subtree_count = node.subtree_count - 1;
                self.arena.update_height(successor);
                successor
            }
        };
        self.arena.release(id)?;
        Ok(replacement)
    }

    /// Detach the smallest node of `subtree`.
    ///
    /// Returns the new root of the remaining subtree and the detached index.
    /// The detached slot stays occupied; the caller relinks or releases it.
    pub(crate) fn detach_min(&mut self, subtree: NodeId) -> TreeResult<(NodeId, NodeId)> {
        if subtree == NULL_NODE {
            return Err(AvlTreeError::corrupted_tree(
                "Successor extraction",
                "expected a node, found an empty subtree",
            ));
        }
        let left = self.arena[subtree].left;
        if left == NULL_NODE {
            return Ok((self.arena[subtree].right, subtree));
        }

        let (left, min) = self.detach_min(left)?;
        self.arena[subtree].left = left;
        self.arena[subtree].subtree_count -= 1;
        self.arena.update_height(subtree);
        Ok((B::rebalance(&mut self.arena, subtree)?, min))
    }

    /// Detach the largest node of `subtree`. Mirror of `detach_min`.
    pub(crate) fn detach_max(&mut self, subtree: NodeId) -> TreeResult<(NodeId, NodeId)> {
        if subtree == NULL_NODE {
            return Err(AvlTreeError::corrupted_tree(
                "Predecessor extraction",
                "expected a node, found an empty subtree",
            ));
        }
        let right = self.arena[subtree].right;
        if right == NULL_NODE {
            return Ok((self.arena[subtree].left, subtree));
        }

        let (right, max) = self.detach_max(right)?;
        self.arena[subtree].right = right;
        self.arena[subtree].subtree_count -= 1;
        self.arena.update_height(subtree);
        Ok((B::rebalance(&mut self.arena, subtree)?, max))
    }
}
