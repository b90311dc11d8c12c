//! Error types.
//!
//! Missing keys are not errors: `get` and `remove` signal them with `None`.
//! The types here cover the failures a caller can actually observe:
//!
//! - [`InvariantViolation`]: reported by [`RandomBst::verify`](crate::RandomBst::verify)
//! - [`SnapshotError`] and [`ShapeError`]: encoding, decoding, or validating a snapshot
//! - [`ConfigError`]: malformed stress configuration
//! - [`StressError`]: a check failed during a stress run

use std::fmt;

use thiserror::Error;

/// Which bound an out-of-order key crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderSide {
    /// The key must be strictly greater than the bound (it sits in a right subtree).
    Lower,
    /// The key must be strictly less than the bound (it sits in a left subtree).
    Upper,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => formatter.write_str("greater than"),
            Self::Upper => formatter.write_str("less than"),
        }
    }
}

/// A structural defect found by [`RandomBst::verify`](crate::RandomBst::verify).
///
/// A violation always means a bug in insertion, removal, or join (or a
/// corrupted snapshot). It is never corrected automatically.
///
/// # Examples
///
/// ```rust
/// use randbst::InvariantViolation;
///
/// let violation = InvariantViolation::SizeMismatch { key: 4, expected: 3, recorded: 2 };
/// assert_eq!(
///     violation.to_string(),
///     "size mismatch at key 4: expected 3, recorded 2"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation<K> {
    /// A node's stored size differs from `1 + size(left) + size(right)`.
    #[error("size mismatch at key {key:?}: expected {expected}, recorded {recorded}")]
    SizeMismatch {
        /// Key of the offending node.
        key: K,
        /// Size recomputed from the node's children.
        expected: usize,
        /// Size stored in the node.
        recorded: usize,
    },
    /// A key sits on the wrong side of one of its ancestors.
    #[error("ordering violation at key {key:?}: must be {side} {bound:?}")]
    OrderViolation {
        /// Key of the offending node.
        key: K,
        /// Ancestor key the node must be ordered against.
        bound: K,
        /// Direction of the required ordering.
        side: OrderSide,
    },
}

impl<K> InvariantViolation<K> {
    /// Returns the key of the node where the violation was found.
    pub const fn key(&self) -> &K {
        match self {
            Self::SizeMismatch { key, .. } | Self::OrderViolation { key, .. } => key,
        }
    }
}

/// Failure to produce or accept a tree snapshot.
#[cfg(feature = "serde")]
#[derive(Debug, Error)]
pub enum SnapshotError<K> {
    /// The binary codec rejected the input or output.
    #[error("snapshot codec failed: {0}")]
    Codec(#[from] bincode::Error),
    /// Reading or writing the snapshot file failed.
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The decoded node records do not link up into a single tree.
    #[error("snapshot is malformed: {0}")]
    Shape(#[from] ShapeError),
    /// The bytes decoded into a node graph that breaks a tree invariant.
    #[error("snapshot holds an invalid tree: {0}")]
    Invalid(InvariantViolation<K>),
}

/// Structural defect in the pre-order node records of a snapshot.
///
/// Found while linking records into nodes, before any ordering or size check.
#[cfg(feature = "serde")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A record follows a tree that was already complete.
    #[error("record {index} follows a complete tree")]
    TrailingRecord {
        /// Position of the first surplus record.
        index: usize,
    },
    /// The records ran out while some nodes still expected children.
    #[error("records end with {open} node(s) still missing a child")]
    MissingChildren {
        /// Nodes left waiting for a child.
        open: usize,
    },
}

/// Stress configuration error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },
}

/// The extreme key a stress check was tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extremum {
    /// Smallest key.
    Min,
    /// Largest key.
    Max,
}

impl fmt::Display for Extremum {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min => formatter.write_str("min"),
            Self::Max => formatter.write_str("max"),
        }
    }
}

/// A failed check during a stress run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StressError {
    /// `verify` reported a violation.
    #[error("invariant broken after {operations} operations: {violation}")]
    Invariant {
        /// Operations performed before the check.
        operations: usize,
        /// The reported violation.
        violation: InvariantViolation<i64>,
    },
    /// `min_key` or `max_key` disagreed with the tracked extreme.
    #[error("expected {which} key {expected:?}, tree reports {actual:?}")]
    Extremum {
        /// Which extreme was checked.
        which: Extremum,
        /// Tracked value.
        expected: Option<i64>,
        /// Value reported by the tree.
        actual: Option<i64>,
    },
    /// After removing an extreme key, the new extreme did not move inward.
    #[error("{which} key did not advance: previous {previous}, current {current}")]
    NotMonotonic {
        /// Which extreme was removed.
        which: Extremum,
        /// Extreme before the removal.
        previous: i64,
        /// Extreme after the removal.
        current: i64,
    },
    /// Removing a key known to be present returned nothing.
    #[error("removing present key {key} returned nothing")]
    MissingKey {
        /// The key that should have been present.
        key: i64,
    },
    /// Removing a key known to be absent returned a value.
    #[error("removing absent key {key} returned a value")]
    PhantomRemoval {
        /// The key that should have been absent.
        key: i64,
    },
    /// The tree's size disagrees with the number of live keys.
    #[error("size drifted: expected {expected}, tree reports {actual}")]
    SizeDrift {
        /// Expected size.
        expected: usize,
        /// Size reported by the tree.
        actual: usize,
    },
    /// Not enough distinct keys in the requested range.
    #[error("cannot draw {requested} unique keys from a space of {available}")]
    KeySpace {
        /// Number of unique keys requested.
        requested: usize,
        /// Number of keys in the range.
        available: u64,
    },
}
