use avltree::{AvlTreeError, AvlTreeMap, BstMap, TreeConfig, VerifyMode};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

fn assert_valid(tree: &AvlTreeMap) {
    if let Err(e) = tree.validate() {
        panic!("invariant violated: {}\n{}", e, tree);
    }
}

#[test]
fn test_round_trip() {
    let mut tree = AvlTreeMap::new(4).unwrap();
    tree.insert(10, 100).unwrap();
    tree.insert(20, 200).unwrap();
    tree.insert(5, 50).unwrap();
    assert_eq!(tree.len(), 3);

    let hit = tree.search(20);
    assert_eq!(hit.value, Some(200));
    assert!(hit.signed_probes() > 0);

    let removed = tree.remove(10).unwrap();
    assert_eq!(removed.value, Some(100));
    assert!(removed.signed_probes() > 0);
    assert_eq!(tree.len(), 2);

    let miss = tree.search(10);
    assert_eq!(miss.value, None);
    assert!(miss.signed_probes() < 0);
    assert_valid(&tree);
}

#[test]
fn test_ascending_inserts_stay_balanced() {
    let mut tree = AvlTreeMap::new(1).unwrap();
    for k in 1..=7 {
        tree.insert(k, k).unwrap();
        assert_valid(&tree);
    }
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.node(tree.root_id()).unwrap().key(), 4);
}

#[test]
fn test_growth_from_capacity_one() {
    let mut tree = AvlTreeMap::new(1).unwrap();
    assert_eq!(tree.capacity(), 1);
    for k in [50, 10, 40, 20, 30] {
        tree.insert(k, k + 1).unwrap();
    }
    assert!(tree.capacity() >= 5);
    assert_eq!(tree.capacity(), 8);
    for k in [10, 20, 30, 40, 50] {
        assert_eq!(tree.get(k), Some(k + 1));
    }
    assert_valid(&tree);
}

#[test]
fn test_upsert_keeps_size() {
    let mut tree = AvlTreeMap::new(2).unwrap();
    assert!(tree.insert(7, 1).unwrap().is_new());
    let second = tree.insert(7, 2).unwrap();
    assert_eq!(second.replaced, Some(1));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.get(7), Some(2));
}

#[test]
fn test_empty_tree_short_circuits() {
    let mut tree = AvlTreeMap::new(1).unwrap();
    let miss = tree.remove(3).unwrap();
    assert_eq!(miss.value, None);
    assert_eq!(miss.probes, 0);
    assert_eq!(tree.search(3).signed_probes(), 0);
}

#[test]
fn test_bulk_build_reproduces_input() {
    let pairs: Vec<(u64, u64)> = (0..1000).map(|k| (k * 3, k)).collect();
    let tree = AvlTreeMap::bulk_build(&pairs).unwrap();
    assert_eq!(tree.len(), 1000);
    assert_eq!(tree.to_vec(), pairs);
    assert_eq!(tree.capacity(), 2000);
    // A midpoint split of 1000 elements is perfectly balanced to depth 10.
    assert_eq!(tree.height(), 10);
    assert_valid(&tree);
}

#[test]
fn test_bulk_build_rejects_unsorted_input() {
    let err = AvlTreeMap::bulk_build(&[(1, 0), (3, 0), (3, 0)]).unwrap_err();
    assert!(matches!(err, AvlTreeError::UnsortedInput { index: 2 }));
    let err = AvlTreeMap::bulk_build(&[(5, 0), (4, 0)]).unwrap_err();
    assert!(matches!(err, AvlTreeError::UnsortedInput { index: 1 }));
}

#[test]
fn test_free_list_soundness_under_churn() {
    let mut tree = AvlTreeMap::new(1).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..2000 {
        let key = rng.gen_range(0..200);
        if rng.gen_bool(0.6) {
            tree.insert(key, key).unwrap();
        } else {
            tree.remove(key).unwrap();
        }
        let stats = tree.arena_stats();
        assert_eq!(stats.occupied + stats.free, stats.capacity);
        assert_eq!(stats.occupied, tree.len());
        assert_eq!(tree.free_slot_count(), stats.free);
    }
    assert_valid(&tree);
}

#[test]
fn test_random_workload_matches_btreemap() {
    let mut tree = AvlTreeMap::new(16).unwrap();
    let mut model = BTreeMap::new();
    let mut rng = StdRng::seed_from_u64(42);

    for step in 0..5000 {
        let key = rng.gen_range(0..500u64);
        match rng.gen_range(0..3) {
            0 | 1 => {
                let value = rng.gen::<u64>();
                let outcome = tree.insert(key, value).unwrap();
                assert_eq!(outcome.replaced, model.insert(key, value));
            }
            _ => {
                let outcome = tree.remove(key).unwrap();
                assert_eq!(outcome.value, model.remove(&key));
                assert_eq!(outcome.is_found(), outcome.signed_probes() > 0);
            }
        }
        if step % 500 == 0 {
            assert_valid(&tree);
        }
    }

    assert_eq!(tree.len(), model.len());
    let expected: Vec<(u64, u64)> = model.iter().map(|(&k, &v)| (k, v)).collect();
    assert_eq!(tree.to_vec(), expected);
    assert_eq!(tree.first(), model.first_key_value().map(|(&k, &v)| (k, v)));
    assert_eq!(tree.last(), model.last_key_value().map(|(&k, &v)| (k, v)));
    assert_valid(&tree);
}

#[test]
fn test_height_is_logarithmic() {
    let mut keys: Vec<u64> = (0..4096).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(3));
    let mut tree = AvlTreeMap::new(1).unwrap();
    for &k in &keys {
        tree.insert(k, 0).unwrap();
    }
    // AVL bound: h < 1.45 * log2(n + 2)
    assert!(tree.height() <= 17, "height {}", tree.height());
    assert!(tree.height() >= 13);
}

#[test]
fn test_drain_in_both_directions() {
    let pairs: Vec<(u64, u64)> = (0..64).map(|k| (k, k)).collect();
    let mut tree = AvlTreeMap::bulk_build(&pairs).unwrap();
    let mut front = 0;
    let mut back = 63;
    while !tree.is_empty() {
        assert_eq!(tree.pop_first().unwrap(), Some((front, front)));
        front += 1;
        if let Some(pair) = tree.pop_last().unwrap() {
            assert_eq!(pair, (back, back));
            back -= 1;
        }
        assert_valid(&tree);
    }
    assert_eq!(tree.pop_first().unwrap(), None);
    assert_eq!(tree.free_slot_count(), tree.capacity());
}

#[test]
fn test_clear_then_reuse() {
    let mut tree = AvlTreeMap::new(1).unwrap();
    for k in 0..33 {
        tree.insert(k, k).unwrap();
    }
    let capacity = tree.capacity();
    tree.clear();
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.capacity(), capacity);
    for k in 100..133 {
        tree.insert(k, k).unwrap();
    }
    assert_eq!(tree.capacity(), capacity);
    assert_valid(&tree);
}

#[test]
fn test_verifying_tree_runs_all_operations() {
    let config = TreeConfig::new(1).with_verify(VerifyMode::EveryMutation);
    let pairs: Vec<(u64, u64)> = (0..20).map(|k| (k * 2, k)).collect();
    let mut tree = AvlTreeMap::bulk_build_with_config(&pairs, config).unwrap();
    assert!(tree.config().verifies_mutations());
    for k in 0..40 {
        tree.insert(k, k).unwrap();
    }
    for k in (0..40).rev().step_by(3) {
        tree.remove(k).unwrap();
    }
    assert_valid(&tree);
}

#[test]
fn test_bst_strategy_degenerates_but_stays_correct() {
    let mut tree = BstMap::new(1).unwrap();
    for k in (0..100).rev() {
        tree.insert(k, k).unwrap();
    }
    assert_eq!(tree.height(), 100);
    assert_eq!(tree.search(0).probes, 100);
    tree.remove(50).unwrap();
    assert_eq!(tree.len(), 99);
    assert!(tree.validate().is_ok());
}

#[test]
fn test_order_queries_agree_with_btreemap() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut model = BTreeMap::new();
    let mut tree = AvlTreeMap::new(8).unwrap();
    for _ in 0..300 {
        let (k, v) = (rng.gen_range(0..1000u64), rng.gen_range(0..50u64));
        model.insert(k, v);
        tree.insert(k, v).unwrap();
    }

    for _ in 0..200 {
        let a = rng.gen_range(0..1100u64);
        let b = rng.gen_range(0..1100u64);
        let (lo, hi) = (a.min(b), a.max(b));

        let expected: u128 = model.range(lo..=hi).map(|(_, &v)| u128::from(v)).sum();
        assert_eq!(tree.range_sum(lo, hi), expected);

        let succ = model.range(a + 1..).next().map(|(&k, &v)| (k, v));
        assert_eq!(tree.successor(a), succ);
        let pred = model.range(..a).next_back().map(|(&k, &v)| (k, v));
        assert_eq!(tree.predecessor(a), pred);
        assert_eq!(tree.rank(a), model.range(..a).count());

        let got: Vec<(u64, u64)> = tree.range(lo..hi).collect();
        let want: Vec<(u64, u64)> = model.range(lo..hi).map(|(&k, &v)| (k, v)).collect();
        assert_eq!(got, want);
    }
}
