use avltree::{ArenaTreeMap, Avl, AvlTreeMap, Balancer, BstMap};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(u64, u64),
    Remove(u64),
    Search(u64),
    PopFirst,
    Clear,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // A narrow key space forces replacements and hits on removal.
    let key = 0u64..128;
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        30 => key.clone().prop_map(Op::Remove),
        17 => key.prop_map(Op::Search),
        2 => Just(Op::PopFirst),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=400)
}

fn check_against_model<B: Balancer>(
    tree: &mut ArenaTreeMap<B>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: BTreeMap<u64, u64> = BTreeMap::new();

    for op in ops {
        match op {
            Op::Insert(k, v) => {
                let outcome = tree.insert(k, v).unwrap();
                prop_assert_eq!(outcome.replaced, model.insert(k, v));
            }
            Op::Remove(k) => {
                let outcome = tree.remove(k).unwrap();
                prop_assert_eq!(outcome.value, model.remove(&k));
                if model.is_empty() && outcome.value.is_none() {
                    prop_assert!(outcome.signed_probes() <= 0);
                } else {
                    prop_assert_eq!(outcome.signed_probes() > 0, outcome.value.is_some());
                }
            }
            Op::Search(k) => {
                let outcome = tree.search(k);
                prop_assert_eq!(outcome.value, model.get(&k).copied());
                if !tree.is_empty() {
                    prop_assert_eq!(outcome.signed_probes() > 0, outcome.is_found());
                }
            }
            Op::PopFirst => {
                let popped = tree.pop_first().unwrap();
                prop_assert_eq!(popped, model.pop_first());
            }
            Op::Clear => {
                tree.clear();
                model.clear();
            }
        }

        prop_assert_eq!(tree.len(), model.len());
        if let Err(e) = tree.validate() {
            return Err(TestCaseError::fail(format!("{}\n{}", e, tree)));
        }
        let stats = tree.arena_stats();
        prop_assert_eq!(stats.occupied + stats.free, stats.capacity);
    }

    let expected: Vec<(u64, u64)> = model.into_iter().collect();
    prop_assert_eq!(tree.to_vec(), expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_avl_matches_btreemap(ops in ops_strategy(), capacity in 1usize..8) {
        let mut tree = AvlTreeMap::new(capacity).unwrap();
        check_against_model(&mut tree, ops)?;
    }

    #[test]
    fn prop_bst_matches_btreemap(ops in ops_strategy()) {
        let mut tree = BstMap::new(1).unwrap();
        check_against_model(&mut tree, ops)?;
    }

    #[test]
    fn prop_bulk_build_reproduces_input(keys in prop::collection::btree_set(any::<u64>(), 0..300)) {
        let pairs: Vec<(u64, u64)> = keys.iter().map(|&k| (k, k.wrapping_mul(31))).collect();
        let tree = ArenaTreeMap::<Avl>::bulk_build(&pairs).unwrap();
        prop_assert_eq!(tree.len(), pairs.len());
        prop_assert!(tree.validate().is_ok());
        prop_assert_eq!(tree.to_vec(), pairs);
    }

    #[test]
    fn prop_rank_and_neighbors(keys in prop::collection::btree_set(0u64..10_000, 1..200), probe in 0u64..10_000) {
        let pairs: Vec<(u64, u64)> = keys.iter().map(|&k| (k, 1)).collect();
        let tree = AvlTreeMap::bulk_build(&pairs).unwrap();
        prop_assert_eq!(tree.rank(probe), keys.range(..probe).count());
        prop_assert_eq!(tree.successor(probe).map(|(k, _)| k), keys.range(probe + 1..).next().copied());
        prop_assert_eq!(tree.predecessor(probe).map(|(k, _)| k), keys.range(..probe).next_back().copied());
        prop_assert_eq!(tree.range_sum(0, probe), keys.range(..=probe).count() as u128);
    }
}
