//! Event counter built on top of the AVL tree.
//!
//! Each event id maps to a positive count. Counts that drop to zero are
//! removed, so the tree only ever holds live events.

use crate::config::TreeConfig;
use crate::error::{InitResult, ModifyResult};
use crate::types::{AvlTreeMap, Key, KvPair, Value, MIN_CAPACITY};

/// Counts of events keyed by id.
#[derive(Debug, Clone)]
pub struct EventCounter {
    tree: AvlTreeMap,
}

impl EventCounter {
    /// Creates an empty counter backed by a minimal arena.
    pub fn new() -> InitResult<Self> {
        Self::with_config(TreeConfig::new(MIN_CAPACITY))
    }

    /// Creates an empty counter with the given tree configuration.
    pub fn with_config(config: TreeConfig) -> InitResult<Self> {
        Ok(Self {
            tree: AvlTreeMap::with_config(config)?,
        })
    }

    /// Seeds the counter from `(id, count)` pairs sorted by strictly
    /// ascending id.
    pub fn from_sorted(pairs: &[KvPair]) -> InitResult<Self> {
        Ok(Self {
            tree: AvlTreeMap::bulk_build(pairs)?,
        })
    }

    /// Like [`EventCounter::from_sorted`] with an explicit configuration.
    pub fn from_sorted_with_config(pairs: &[KvPair], config: TreeConfig) -> InitResult<Self> {
        Ok(Self {
            tree: AvlTreeMap::bulk_build_with_config(pairs, config)?,
        })
    }

    /// Adds `m` to the count of `id`, inserting it if absent. Returns the
    /// new count, saturating at `u64::MAX`.
    pub fn increase(&mut self, id: Key, m: Value) -> ModifyResult<Value> {
        let updated = self.count(id).saturating_add(m);
        self.tree.insert(id, updated)?;
        Ok(updated)
    }

    /// Subtracts `m` from the count of `id`. When the count would reach
    /// zero or below, `id` is removed and 0 is returned. Absent ids
    /// return 0.
    pub fn reduce(&mut self, id: Key, m: Value) -> ModifyResult<Value> {
        match self.tree.get(id) {
            None => Ok(0),
            Some(current) if current <= m => {
                self.tree.remove(id)?;
                Ok(0)
            }
            Some(current) => {
                let updated = current - m;
                self.tree.insert(id, updated)?;
                Ok(updated)
            }
        }
    }

    /// Count of `id`, 0 if absent.
    pub fn count(&self, id: Key) -> Value {
        self.tree.get(id).unwrap_or(0)
    }

    /// Event with the lowest id greater than `id`.
    pub fn next(&self, id: Key) -> Option<KvPair> {
        self.tree.successor(id)
    }

    /// Event with the greatest id less than `id`.
    pub fn previous(&self, id: Key) -> Option<KvPair> {
        self.tree.predecessor(id)
    }

    /// Total count of ids in `id1..=id2`.
    pub fn in_range(&self, id1: Key, id2: Key) -> u128 {
        self.tree.range_sum(id1, id2)
    }

    /// Number of live events.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if no event has a positive count.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The underlying tree, for inspection.
    pub fn tree(&self) -> &AvlTreeMap {
        &self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increase_inserts_then_accumulates() {
        let mut ec = EventCounter::new().unwrap();
        assert_eq!(ec.increase(5, 3).unwrap(), 3);
        assert_eq!(ec.increase(5, 4).unwrap(), 7);
        assert_eq!(ec.count(5), 7);
        assert_eq!(ec.len(), 1);
    }

    #[test]
    fn test_increase_saturates() {
        let mut ec = EventCounter::from_sorted(&[(1, u64::MAX - 1)]).unwrap();
        assert_eq!(ec.increase(1, 10).unwrap(), u64::MAX);
    }

    #[test]
    fn test_reduce_removes_at_zero() {
        let mut ec = EventCounter::from_sorted(&[(1, 10), (2, 5)]).unwrap();
        assert_eq!(ec.reduce(1, 4).unwrap(), 6);
        assert_eq!(ec.reduce(2, 5).unwrap(), 0);
        assert_eq!(ec.count(2), 0);
        assert_eq!(ec.len(), 1);
        assert_eq!(ec.reduce(1, 100).unwrap(), 0);
        assert!(ec.is_empty());
        assert_eq!(ec.reduce(42, 1).unwrap(), 0);
        assert!(ec.tree().validate().is_ok());
    }

    #[test]
    fn test_next_previous_and_range() {
        let ec = EventCounter::from_sorted(&[(2, 20), (4, 40), (8, 80)]).unwrap();
        assert_eq!(ec.next(4), Some((8, 80)));
        assert_eq!(ec.next(8), None);
        assert_eq!(ec.previous(4), Some((2, 20)));
        assert_eq!(ec.previous(2), None);
        assert_eq!(ec.in_range(3, 8), 120);
        assert_eq!(ec.in_range(0, 1), 0);
    }

    #[test]
    fn test_verified_counter_survives_churn() {
        let mut ec = EventCounter::with_config(TreeConfig::new(1).verifying()).unwrap();
        for id in 0..50 {
            ec.increase(id, id + 1).unwrap();
        }
        for id in (0..50).step_by(2) {
            ec.reduce(id, u64::MAX).unwrap();
        }
        assert_eq!(ec.len(), 25);
        assert_eq!(ec.in_range(0, 49), (1..=49).step_by(2).map(|c| c + 1).sum());
    }
}
