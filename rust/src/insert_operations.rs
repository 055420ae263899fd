//! INSERT operations for ArenaTreeMap.
//!
//! Insertion descends recursively to the attachment point, procures a slot
//! for a new key (growing the arena first when it is full), and fixes subtree
//! counts and heights while the recursion unwinds. Each touched subtree root
//! is handed to the tree's `Balancer` after its metadata is refreshed.

use crate::error::{ModifyResult, TreeResult};
use crate::rebalance::Balancer;
use crate::types::{ArenaTreeMap, Insertion, Key, KvPair, NodeId, Value, NULL_NODE};
use std::cmp::Ordering;

impl<B: Balancer> ArenaTreeMap<B> {
    /// Insert a key-value pair, replacing the value if the key exists.
    ///
    /// Returns the number of existing nodes visited and the replaced value.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let mut tree = AvlTreeMap::new(1).unwrap();
    /// assert!(tree.insert(1, 10).unwrap().is_new());
    /// let again = tree.insert(1, 11).unwrap();
    /// assert_eq!(again.replaced, Some(10));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: Key, value: Value) -> ModifyResult<Insertion> {
        if self.arena.is_full() {
            self.arena.grow();
        }

        let mut outcome = Insertion {
            probes: 0,
            replaced: None,
        };
        self.root = self.insert_at(self.root, key, value, &mut outcome)?;

        self.verify_after("insert")?;
        Ok(outcome)
    }

    /// Insert several pairs in order, stopping at the first failure.
    pub fn batch_insert(&mut self, items: &[KvPair]) -> ModifyResult<Vec<Insertion>> {
        items
            .iter()
            .map(|&(key, value)| self.insert(key, value))
            .collect()
    }

    fn insert_at(
        &mut self,
        subtree: NodeId,
        key: Key,
        value: Value,
        outcome: &mut Insertion,
    ) -> TreeResult<NodeId> {
        if subtree == NULL_NODE {
            return self.arena.procure(key, value);
        }
        outcome.probes += 1;

        match key.cmp(&self.arena[subtree].key) {
            Ordering::Less => {
                let left = self.insert_at(self.arena[subtree].left, key, value, outcome)?;
                self.arena[subtree].left = left;
            }
            Ordering::Greater => {
                let right = self.insert_at(self.arena[subtree].right, key, value, outcome)?;
                self.arena[subtree].right = right;
            }
            Ordering::Equal => {
                let old = std::mem::replace(&mut self.arena[subtree].value, value);
                outcome.replaced = Some(old);
                return Ok(subtree);
            }
        }

        if !outcome.is_new() {
            return Ok(subtree);
        }
        self.arena[subtree].subtree_count += 1;
        self.arena.update_height(subtree);
        B::rebalance(&mut self.arena, subtree)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TreeConfig;
    use crate::types::{AvlTreeMap, BstMap};

    #[test]
    fn test_insert_into_empty_tree_visits_nothing() {
        let mut tree = AvlTreeMap::new(1).unwrap();
        let outcome = tree.insert(7, 70).unwrap();
        assert_eq!(outcome.probes, 0);
        assert!(outcome.is_new());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_insert_counts_probes() {
        let mut tree = AvlTreeMap::new(4).unwrap();
        tree.insert(10, 100).unwrap();
        assert_eq!(tree.insert(20, 200).unwrap().probes, 1);
        assert_eq!(tree.insert(5, 50).unwrap().probes, 1);
        assert_eq!(tree.insert(1, 10).unwrap().probes, 2);
    }

    #[test]
    fn test_upsert_keeps_size() {
        let mut tree = AvlTreeMap::with_config(TreeConfig::new(2).verifying()).unwrap();
        tree.insert(1, 1).unwrap();
        tree.insert(2, 2).unwrap();
        let outcome = tree.insert(2, 22).unwrap();
        assert_eq!(outcome.replaced, Some(2));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(2), Some(22));
    }

    #[test]
    fn test_growth_from_single_slot() {
        let mut tree = AvlTreeMap::new(1).unwrap();
        for k in [50, 20, 80, 10, 30] {
            tree.insert(k, k * 2).unwrap();
        }
        assert_eq!(tree.capacity(), 8);
        assert_eq!(tree.len(), 5);
        for k in [50, 20, 80, 10, 30] {
            assert_eq!(tree.get(k), Some(k * 2));
        }
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_ascending_inserts_rotate() {
        let mut tree = AvlTreeMap::with_config(TreeConfig::new(1).verifying()).unwrap();
        for k in 1..=7 {
            tree.insert(k, k).unwrap();
        }
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.node(tree.root_id()).map(|n| n.key()), Some(4));
    }

    #[test]
    fn test_plain_bst_degenerates() {
        let mut tree = BstMap::with_config(TreeConfig::new(1).verifying()).unwrap();
        for k in 1..=7 {
            tree.insert(k, k).unwrap();
        }
        assert_eq!(tree.height(), 7);
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn test_batch_insert() {
        let mut tree = AvlTreeMap::new(2).unwrap();
        let outcomes = tree.batch_insert(&[(3, 30), (1, 10), (3, 33)]).unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[2].replaced, Some(30));
        assert_eq!(tree.to_vec(), vec![(1, 10), (3, 33)]);
    }
}
