//! Stress tooling.
//!
//! Long-running fill and drain cycles that exercise `put` and `remove` at
//! scale and call [`RandomBst::verify`] on a fixed cadence. Every check that
//! fails is returned as a [`StressError`]; nothing here panics on a broken
//! tree.
//!
//! Progress is reported through `tracing` at `info` level; install a
//! subscriber to see it.
//!
//! # Examples
//!
//! ```rust
//! use randbst::stress::{StressConfig, drain, fill};
//!
//! let config = StressConfig {
//!     count: 2_000,
//!     verify_every: 500,
//!     seed: Some(3),
//!     ..StressConfig::default()
//! };
//!
//! let (mut tree, filled) = fill(&config).unwrap();
//! assert_eq!(filled.size, tree.len());
//!
//! let drained = drain(&mut tree, &config).unwrap();
//! assert_eq!(drained.removals, filled.size);
//! assert!(tree.is_empty());
//! ```

mod config;

pub use config::StressConfig;

use std::collections::HashSet;
use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Extremum, StressError};
use crate::tree::RandomBst;

/// Outcome of [`fill`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Number of puts performed.
    pub operations: usize,
    /// Distinct keys in the tree afterwards.
    pub size: usize,
    /// Tree height afterwards.
    pub height: usize,
}

/// Outcome of [`drain`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Number of keys removed.
    pub removals: usize,
    /// Smallest key tracked when the tree became empty.
    pub last_min: Option<i64>,
    /// Largest key tracked when the tree became empty.
    pub last_max: Option<i64>,
}

/// Default key range for [`populate`]: `0..=100 * count`.
pub fn default_range(count: usize) -> RangeInclusive<i64> {
    let count = i64::try_from(count).unwrap_or(i64::MAX);
    0..=count.saturating_mul(100)
}

/// Puts `count` random keys drawn uniformly from `range`, each with a random
/// value from the same range.
///
/// With `unique`, keys already drawn are redrawn, so the tree grows by
/// exactly `count`. Without it, repeated keys overwrite their value.
///
/// # Errors
///
/// Returns [`StressError::KeySpace`] if `range` is empty while `count` is
/// positive, or if `unique` is set and `range` holds fewer than `count` keys.
pub fn populate<T, G>(
    tree: &mut RandomBst<i64, i64, T>,
    count: usize,
    range: RangeInclusive<i64>,
    unique: bool,
    rng: &mut G,
) -> Result<(), StressError>
where
    T: Rng,
    G: Rng,
{
    let available = key_space(&range);
    let too_small = if unique {
        u64::try_from(count).map_or(true, |requested| requested > available)
    } else {
        count > 0 && available == 0
    };
    if too_small {
        return Err(StressError::KeySpace {
            requested: count,
            available,
        });
    }

    let mut drawn = HashSet::with_capacity(if unique { count } else { 0 });
    for _ in 0..count {
        let mut key = rng.gen_range(range.clone());
        if unique {
            while !drawn.insert(key) {
                key = rng.gen_range(range.clone());
            }
        }
        let value = rng.gen_range(range.clone());
        tree.put(key, value);
    }
    Ok(())
}

/// Fills a fresh tree with `config.count` puts.
///
/// Keys are `0..count` in order when `config.ordered` is set (value
/// `2 * key`), otherwise uniform draws from `0..=count` for both key and
/// value. The running minimum and maximum are tracked and, when
/// `config.check_min_max` is set, compared against the tree after each put.
///
/// # Errors
///
/// The first failed check, as a [`StressError`].
pub fn fill(config: &StressConfig) -> Result<(RandomBst<i64, i64>, FillReport), StressError> {
    let mut keys = seeded(config.seed);
    let mut tree = config
        .seed
        .map_or_else(RandomBst::new, |seed| RandomBst::with_seed(seed.wrapping_add(1)));
    let bound = i64::try_from(config.count).unwrap_or(i64::MAX);
    let mut extremes: Option<(i64, i64)> = None;

    tracing::info!(count = config.count, ordered = config.ordered, "fill started");
    for index in 0..config.count {
        let (key, value) = if config.ordered {
            let key = i64::try_from(index).unwrap_or(i64::MAX);
            (key, key.saturating_mul(2))
        } else {
            (keys.gen_range(0..=bound), keys.gen_range(0..=bound))
        };
        let (low, high) = extremes.map_or((key, key), |(low, high)| (low.min(key), high.max(key)));
        extremes = Some((low, high));

        tree.put(key, value);

        if config.check_min_max {
            expect_extreme(Extremum::Min, Some(low), tree.min_key().copied())?;
            expect_extreme(Extremum::Max, Some(high), tree.max_key().copied())?;
        }
        checkpoint(&tree, index + 1, config)?;
    }

    let report = FillReport {
        operations: config.count,
        size: tree.len(),
        height: tree.height(),
    };
    tracing::info!(size = report.size, height = report.height, "fill finished");
    Ok((tree, report))
}

/// Empties `tree` by repeatedly removing its minimum or maximum key, chosen
/// by a fair coin.
///
/// After each removal:
///
/// - the removal must have returned a value
/// - the new minimum (or maximum) must lie strictly inside the old one
/// - removing a key just below the minimum must return `None` and leave the
///   size unchanged
/// - the size must have dropped by exactly one
///
/// # Errors
///
/// The first failed check, as a [`StressError`].
pub fn drain<T: Rng>(
    tree: &mut RandomBst<i64, i64, T>,
    config: &StressConfig,
) -> Result<DrainReport, StressError> {
    let (Some(mut low), Some(mut high)) = (tree.min_key().copied(), tree.max_key().copied())
    else {
        return Ok(DrainReport::default());
    };
    let mut coin = seeded(config.seed.map(|seed| seed.wrapping_add(2)));
    let mut expected = tree.len();
    let mut removals = 0;

    tracing::info!(size = expected, "drain started");
    while !tree.is_empty() {
        expect_size(expected, tree.len())?;

        if coin.gen_bool(0.5) {
            let previous = low;
            expect_removed(tree, previous)?;
            if let Some(&current) = tree.min_key() {
                if current <= previous {
                    return Err(failed(StressError::NotMonotonic {
                        which: Extremum::Min,
                        previous,
                        current,
                    }));
                }
                low = current;
            }
        } else {
            let previous = high;
            expect_removed(tree, previous)?;
            if let Some(&current) = tree.max_key() {
                if current >= previous {
                    return Err(failed(StressError::NotMonotonic {
                        which: Extremum::Max,
                        previous,
                        current,
                    }));
                }
                high = current;
            }
        }
        expected -= 1;

        if let Some(absent) = low.checked_sub(1) {
            if tree.remove(&absent).is_some() {
                return Err(failed(StressError::PhantomRemoval { key: absent }));
            }
            expect_size(expected, tree.len())?;
        }

        removals += 1;
        checkpoint(tree, removals, config)?;
    }
    expect_size(0, tree.len())?;

    tracing::info!(removals, last_min = low, last_max = high, "drain finished");
    Ok(DrainReport {
        removals,
        last_min: Some(low),
        last_max: Some(high),
    })
}

fn seeded(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

fn key_space(range: &RangeInclusive<i64>) -> u64 {
    let width = i128::from(*range.end()) - i128::from(*range.start()) + 1;
    u64::try_from(width.max(0)).unwrap_or(u64::MAX)
}

/// Verifies or reports progress when `operations` hits the configured cadence.
fn checkpoint<T>(
    tree: &RandomBst<i64, i64, T>,
    operations: usize,
    config: &StressConfig,
) -> Result<(), StressError> {
    if config.verify_every > 0 && operations % config.verify_every == 0 {
        tracing::info!(
            operations,
            height = tree.height(),
            size = tree.len(),
            "verifying"
        );
        tree.verify()
            .map_err(|violation| failed(StressError::Invariant { operations, violation }))?;
    } else if config.report_every > 0 && operations % config.report_every == 0 {
        tracing::info!(operations, height = tree.height(), size = tree.len(), "progress");
    }
    Ok(())
}

fn expect_removed<T: Rng>(tree: &mut RandomBst<i64, i64, T>, key: i64) -> Result<(), StressError> {
    tree.remove(&key)
        .map(|_| ())
        .ok_or_else(|| failed(StressError::MissingKey { key }))
}

fn expect_extreme(
    which: Extremum,
    expected: Option<i64>,
    actual: Option<i64>,
) -> Result<(), StressError> {
    if expected == actual {
        Ok(())
    } else {
        Err(failed(StressError::Extremum {
            which,
            expected,
            actual,
        }))
    }
}

fn expect_size(expected: usize, actual: usize) -> Result<(), StressError> {
    if expected == actual {
        Ok(())
    } else {
        Err(failed(StressError::SizeDrift { expected, actual }))
    }
}

fn failed(error: StressError) -> StressError {
    tracing::warn!(%error, "stress check failed");
    error
}
