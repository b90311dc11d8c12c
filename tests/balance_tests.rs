//! Statistical balance tests for RandomBst.
//!
//! These check distributions over many seeded trials, so each assertion
//! carries a tolerance well outside the expected sampling noise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use randbst::RandomBst;
use rstest::rstest;

const LARGE: usize = 100_000;

#[allow(clippy::cast_precision_loss)]
fn log2(n: usize) -> f64 {
    (n as f64).log2()
}

#[allow(clippy::cast_precision_loss)]
fn share(hits: usize, trials: usize) -> f64 {
    hits as f64 / trials as f64
}

// =============================================================================
// Height Tests
// =============================================================================

#[rstest]
#[case::ascending_keys(true)]
#[case::random_keys(false)]
fn test_height_is_logarithmic(#[case] ordered: bool) {
    let mut heights = Vec::new();

    for seed in 0..3u64 {
        let mut keys = StdRng::seed_from_u64(seed + 100);
        let mut tree = RandomBst::with_seed(seed);
        for index in 0..LARGE {
            let key = if ordered {
                index as u64
            } else {
                keys.gen_range(0..u64::MAX)
            };
            tree.put(key, ());
        }
        assert!(tree.verify().is_ok());
        heights.push(tree.height());
    }

    // The expected height of a random BST is about 2.99 * log2(n).
    let bound = 4.0 * log2(LARGE);
    for height in &heights {
        #[allow(clippy::cast_precision_loss)]
        let height = *height as f64;
        assert!(height < bound, "height {height} exceeds {bound:.1} in {heights:?}");
    }
}

#[rstest]
fn test_height_stays_logarithmic_after_removals() {
    let mut tree = RandomBst::with_seed(9);
    for key in 0..LARGE {
        tree.put(key, ());
    }
    for key in (0..LARGE).filter(|key| key % 4 != 0) {
        assert_eq!(tree.remove(&key), Some(()));
    }

    assert_eq!(tree.len(), LARGE / 4);
    assert!(tree.verify().is_ok());
    #[allow(clippy::cast_precision_loss)]
    let height = tree.height() as f64;
    assert!(height < 4.0 * log2(tree.len()));
}

// =============================================================================
// Shape Distribution Tests
// =============================================================================

// Of the five BST shapes on three keys, the balanced one has height 2. In a
// uniformly random BST each key is the root with probability 1/3, so the
// balanced shape appears in a third of all trials.

const TRIALS: usize = 3_000;

#[rstest]
#[case::ascending([1, 2, 3])]
#[case::descending([3, 2, 1])]
#[case::middle_first([2, 1, 3])]
fn test_three_key_shapes_are_uniform_after_puts(#[case] keys: [i32; 3]) {
    let balanced = (0..TRIALS as u64)
        .filter(|&seed| {
            let mut tree = RandomBst::with_seed(seed);
            for key in keys {
                tree.put(key, ());
            }
            tree.height() == 2
        })
        .count();

    let observed = share(balanced, TRIALS);
    assert!(
        (observed - 1.0 / 3.0).abs() < 0.05,
        "balanced share {observed:.3} is far from 1/3"
    );
}

#[rstest]
#[case::remove_smallest(1)]
#[case::remove_inner(2)]
#[case::remove_largest(4)]
fn test_three_key_shapes_are_uniform_after_remove(#[case] removed: i32) {
    let balanced = (0..TRIALS as u64)
        .filter(|&seed| {
            let mut tree = RandomBst::with_seed(seed);
            for key in 1..=4 {
                tree.put(key, ());
            }
            tree.remove(&removed);
            tree.height() == 2
        })
        .count();

    let observed = share(balanced, TRIALS);
    assert!(
        (observed - 1.0 / 3.0).abs() < 0.05,
        "balanced share {observed:.3} is far from 1/3"
    );
}
