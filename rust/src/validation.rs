//! Validation and debugging utilities for ArenaTreeMap.
//!
//! `validate` recomputes every height and subtree count from scratch and
//! compares them with the cached values, checks key ordering, the balance
//! property (for self-balancing strategies), and that the free list and the
//! live tree partition the arena. Trees created with
//! `VerifyMode::EveryMutation` run it after every mutation.

use crate::error::{AvlResult, AvlResultExt, AvlTreeError, TreeResult};
use crate::rebalance::Balancer;
use crate::types::{ArenaTreeMap, Key, NodeId, NULL_NODE};
use tracing::error;

/// Recomputed metadata for one subtree.
struct SubtreeFacts {
    height: u32,
    weight: usize,
}

impl<B: Balancer> ArenaTreeMap<B> {
    /// Check if the tree maintains all invariants.
    pub fn check_invariants(&self) -> bool {
        self.validate().is_ok()
    }

    /// Run every structural check, reporting the first violation found.
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let mut tree = AvlTreeMap::new(2).unwrap();
    /// for k in 0..100 {
    ///     tree.insert(k, k).unwrap();
    /// }
    /// assert!(tree.validate().is_ok());
    /// ```
    pub fn validate(&self) -> AvlResult<()> {
        let mut reachable = vec![false; self.arena.capacity() + 1];
        let facts = self.check_subtree(self.root, None, None, &mut reachable)?;

        if facts.weight != self.len() {
            return Err(AvlTreeError::data_integrity(
                "Size",
                &format!("{} reachable nodes but len() is {}", facts.weight, self.len()),
            ));
        }

        self.check_free_list(&reachable, facts.weight)
    }

    /// Validate if the tree was configured to verify mutations.
    pub(crate) fn verify_after(&self, operation: &str) -> TreeResult<()> {
        if !self.config.verifies_mutations() {
            return Ok(());
        }
        self.validate()
            .inspect_err(|e| error!(operation, error = %e, "tree verification failed"))
            .with_operation(operation)
    }

    fn check_subtree(
        &self,
        id: NodeId,
        lower: Option<Key>,
        upper: Option<Key>,
        reachable: &mut [bool],
    ) -> TreeResult<SubtreeFacts> {
        if id == NULL_NODE {
            return Ok(SubtreeFacts {
                height: 0,
                weight: 0,
            });
        }
        let node = self.arena.get(id).ok_or(AvlTreeError::InvalidNode(id))?;
        if std::mem::replace(&mut reachable[id], true) {
            return Err(AvlTreeError::corrupted_tree(
                "Structure",
                &format!("node {} is reachable along more than one path", id),
            ));
        }

        if lower.is_some_and(|lo| node.key <= lo) || upper.is_some_and(|hi| node.key >= hi) {
            return Err(AvlTreeError::corrupted_tree(
                "Ordering",
                &format!(
                    "key {} at node {} is outside ({:?}, {:?})",
                    node.key, id, lower, upper
                ),
            ));
        }

        let left = self.check_subtree(node.left, lower, Some(node.key), reachable)?;
        let right = self.check_subtree(node.right, Some(node.key), upper, reachable)?;

        let height = 1 + left.height.max(right.height);
        if height != node.height {
            return Err(AvlTreeError::data_integrity(
                "Height",
                &format!(
                    "node {} caches height {} but recount gives {}",
                    id, node.height, height
                ),
            ));
        }

        let count = left.weight + right.weight;
        if count != node.subtree_count {
            return Err(AvlTreeError::data_integrity(
                "Subtree count",
                &format!(
                    "node {} caches {} descendants but recount gives {}",
                    id, node.subtree_count, count
                ),
            ));
        }

        if B::SELF_BALANCING {
            let balance = i64::from(left.height) - i64::from(right.height);
            if balance.abs() > 1 {
                return Err(AvlTreeError::corrupted_tree(
                    "Balance",
                    &format!("node {} has balance factor {}", id, balance),
                ));
            }
        }

        Ok(SubtreeFacts {
            height,
            weight: count + 1,
        })
    }

    fn check_free_list(&self, reachable: &[bool], live: usize) -> TreeResult<()> {
        let mut free = 0;
        for id in self.arena.free_slots() {
            if self.arena[id].occupied || reachable[id] {
                return Err(AvlTreeError::corrupted_tree(
                    "Free list",
                    &format!("slot {} is on the free list but still in use", id),
                ));
            }
            free += 1;
        }

        if free + live != self.arena.capacity() {
            return Err(AvlTreeError::corrupted_tree(
                "Free list",
                &format!(
                    "{} free + {} live slots does not cover capacity {}",
                    free,
                    live,
                    self.arena.capacity()
                ),
            ));
        }
        Ok(())
    }
}
