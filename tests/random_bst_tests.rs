//! Unit tests for RandomBst.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use randbst::RandomBst;
use rstest::rstest;

fn tree_with(keys: &[i32], seed: u64) -> RandomBst<i32, String> {
    let mut tree = RandomBst::with_seed(seed);
    for &key in keys {
        tree.put(key, format!("value-{key}"));
    }
    tree
}

// =============================================================================
// Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_tree() {
    let tree: RandomBst<i32, String> = RandomBst::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.verify(), Ok(()));
}

#[rstest]
fn test_with_rng_accepts_any_rng() {
    let mut tree = RandomBst::with_rng(StdRng::seed_from_u64(3));
    for key in 0..20 {
        tree.put(key, ());
    }
    assert_eq!(tree.len(), 20);
    assert_eq!(tree.verify(), Ok(()));
}

#[rstest]
fn test_same_seed_builds_same_shape() {
    let keys: Vec<i32> = (0..500).map(|key| key * 37 % 499).collect();
    let first = tree_with(&keys, 99);
    let second = tree_with(&keys, 99);

    assert_eq!(first.height(), second.height());
    assert_eq!(format!("{first:?}"), format!("{second:?}"));
}

// =============================================================================
// Put and Get Tests
// =============================================================================

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
fn test_insert_five_keys_in_order(#[case] seed: u64) {
    let tree = tree_with(&[5, 3, 8, 1, 4], seed);

    assert_eq!(tree.keys(), vec![&1, &3, &4, &5, &8]);
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.verify(), Ok(()));
}

#[rstest]
fn test_put_twice_replaces_value() {
    let mut tree = RandomBst::with_seed(0);

    assert_eq!(tree.put(5, "a"), None);
    assert_eq!(tree.put(5, "b"), Some("a"));

    assert_eq!(tree.get(&5), Some(&"b"));
    assert_eq!(tree.len(), 1);
}

#[rstest]
fn test_put_existing_key_keeps_size_in_large_tree() {
    let mut tree = tree_with(&(0..200).collect::<Vec<_>>(), 4);

    for key in (0..200).step_by(3) {
        assert_eq!(tree.put(key, "again".to_string()), Some(format!("value-{key}")));
        assert_eq!(tree.len(), 200);
    }
    assert_eq!(tree.verify(), Ok(()));
}

#[rstest]
fn test_get_with_borrowed_key() {
    let mut tree = RandomBst::with_seed(0);
    tree.put("alpha".to_string(), 1);
    tree.put("beta".to_string(), 2);

    assert_eq!(tree.get("alpha"), Some(&1));
    assert_eq!(tree.get("gamma"), None);
    assert!(tree.contains_key("beta"));
}

#[rstest]
fn test_get_does_not_change_tree() {
    let tree = tree_with(&[4, 2, 6, 1, 3, 5, 7], 8);
    let before = format!("{tree:?}");
    let height = tree.height();

    for key in 0..10 {
        let _ = tree.get(&key);
    }

    assert_eq!(format!("{tree:?}"), before);
    assert_eq!(tree.height(), height);
}

// =============================================================================
// Remove Tests
// =============================================================================

#[rstest]
fn test_remove_absent_key_returns_none() {
    let mut tree = tree_with(&[1, 2, 3], 0);

    assert_eq!(tree.remove(&99), None);
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.keys(), vec![&1, &2, &3]);
}

#[rstest]
#[case(0)]
#[case(5)]
#[case(21)]
fn test_remove_absent_key_keeps_structure(#[case] seed: u64) {
    let mut tree = tree_with(&(0..100).map(|key| key * 2).collect::<Vec<_>>(), seed);
    let snapshot = format!("{tree:?}");
    let height = tree.height();

    for key in (1..200).step_by(2) {
        assert_eq!(tree.remove(&key), None);
    }

    assert_eq!(format!("{tree:?}"), snapshot);
    assert_eq!(tree.height(), height);
    assert_eq!(tree.len(), 100);
}

#[rstest]
fn test_remove_present_key_returns_value() {
    let mut tree = tree_with(&[5, 3, 8, 1, 4], 1);

    assert_eq!(tree.remove(&3), Some("value-3".to_string()));

    assert_eq!(tree.len(), 4);
    assert_eq!(tree.keys(), vec![&1, &4, &5, &8]);
    assert_eq!(tree.get(&3), None);
    assert_eq!(tree.verify(), Ok(()));
}

#[rstest]
fn test_remove_on_empty_tree() {
    let mut tree: RandomBst<i32, i32> = RandomBst::with_seed(0);
    assert_eq!(tree.remove(&1), None);
    assert!(tree.is_empty());
}

#[rstest]
fn test_remove_every_key_empties_tree() {
    let keys: Vec<i32> = (0..300).map(|key| key * 7 % 300).collect();
    let mut tree = tree_with(&keys, 12);

    for (removed, key) in keys.iter().enumerate() {
        assert_eq!(tree.remove(key), Some(format!("value-{key}")));
        assert_eq!(tree.len(), keys.len() - removed - 1);
    }

    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
}

// =============================================================================
// Min / Max Tests
// =============================================================================

#[rstest]
fn test_min_and_max_on_empty_tree() {
    let tree: RandomBst<i32, i32> = RandomBst::with_seed(0);
    assert_eq!(tree.min_key(), None);
    assert_eq!(tree.max_key(), None);
}

#[rstest]
fn test_min_and_max_follow_updates() {
    let mut tree = tree_with(&[10, 20, 30], 3);
    assert_eq!(tree.min_key(), Some(&10));
    assert_eq!(tree.max_key(), Some(&30));

    tree.put(5, String::new());
    tree.remove(&30);

    assert_eq!(tree.min_key(), Some(&5));
    assert_eq!(tree.max_key(), Some(&20));
}

// =============================================================================
// Min/Max Drain Scenario
// =============================================================================

#[rstest]
#[case(1)]
#[case(2)]
fn test_drain_by_extremes_keeps_invariants(#[case] seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tree = RandomBst::with_seed(seed);
    for _ in 0..1_000 {
        tree.put(rng.gen_range(0..100_000), rng.gen_range(0..100));
    }
    let mut expected = tree.len();

    while !tree.is_empty() {
        let low = tree.min_key().copied();
        let high = tree.max_key().copied();
        let key = if rng.gen_bool(0.5) { low } else { high };
        let key = key.expect("non-empty tree has extremes");

        assert!(tree.remove(&key).is_some());
        expected -= 1;

        assert_eq!(tree.len(), expected);
        assert_eq!(tree.verify(), Ok(()));
    }

    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
}
