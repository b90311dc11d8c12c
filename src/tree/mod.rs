//! Randomized balanced binary search tree.
//!
//! This module provides [`RandomBst`], a mutable ordered map balanced by
//! random choices weighted with subtree sizes (Martinez and Roura,
//! "Randomized Binary Search Trees", 1998).
//!
//! # Overview
//!
//! Each node records the number of nodes in its subtree. Those sizes are the
//! only balancing state:
//!
//! - `put` promotes the new key to the root of the current subtree with
//!   probability `1 / (size + 1)`, otherwise descends one level and tries again
//! - `remove` replaces the removed node with a random join of its children,
//!   where each side wins the root with probability proportional to its size
//!
//! If the input trees are uniformly random BSTs, both operations produce a
//! uniformly random BST, so the expected height stays `O(log N)` regardless
//! of the order keys arrive in.
//!
//! - O(log N) expected get
//! - O(log N) expected put
//! - O(log N) expected remove
//! - O(log N) expected `min_key`/`max_key`
//! - O(1) len and `is_empty`
//! - O(N) height and verify (diagnostics only)
//!
//! # Examples
//!
//! ```rust
//! use randbst::RandomBst;
//!
//! let mut tree = RandomBst::with_seed(42);
//! for key in [5, 3, 8, 1, 4] {
//!     tree.put(key, key * 10);
//! }
//!
//! let keys: Vec<&i32> = tree.keys();
//! assert_eq!(keys, vec![&1, &3, &4, &5, &8]);
//! assert_eq!(tree.len(), 5);
//! ```

mod insert;
mod node;
mod query;
mod remove;
mod verify;

use std::fmt;
use std::iter::FromIterator;

use rand::SeedableRng;
use rand::rngs::StdRng;

pub(crate) use node::{Link, Node, dismantle};

// =============================================================================
// RandomBst Definition
// =============================================================================

/// A randomized balanced binary search tree.
///
/// The tree exclusively owns its nodes and its random source. It is not
/// thread-safe in the sense of concurrent mutation: callers that share a tree
/// across threads must wrap it in a lock themselves.
///
/// The random source `R` defaults to [`StdRng`]. Use
/// [`RandomBst::with_seed`] for reproducible shapes or
/// [`RandomBst::with_rng`] to supply any other [`rand::Rng`].
///
/// # Time Complexity
///
/// | Operation      | Complexity         |
/// |----------------|--------------------|
/// | `new`          | O(1)               |
/// | `get`          | O(log N) expected  |
/// | `put`          | O(log N) expected  |
/// | `remove`       | O(log N) expected  |
/// | `min_key`      | O(log N) expected  |
/// | `max_key`      | O(log N) expected  |
/// | `len`          | O(1)               |
/// | `height`       | O(N)               |
/// | `verify`       | O(N)               |
///
/// # Examples
///
/// ```rust
/// use randbst::RandomBst;
///
/// let mut tree = RandomBst::new();
/// assert_eq!(tree.put("a", 1), None);
/// assert_eq!(tree.put("a", 2), Some(1));
/// assert_eq!(tree.get("a"), Some(&2));
/// assert_eq!(tree.len(), 1);
/// ```
#[derive(Clone)]
pub struct RandomBst<K, V, R = StdRng> {
    root: Link<K, V>,
    rng: R,
}

impl<K, V> RandomBst<K, V, StdRng> {
    /// Creates an empty tree whose random source is seeded from the OS.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use randbst::RandomBst;
    ///
    /// let tree: RandomBst<i32, String> = RandomBst::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates an empty tree with a deterministic random source.
    ///
    /// Two trees created with the same seed and fed the same operations end
    /// up with the same shape.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use randbst::RandomBst;
    ///
    /// let mut first = RandomBst::with_seed(1);
    /// let mut second = RandomBst::with_seed(1);
    /// for key in 0..100 {
    ///     first.put(key, ());
    ///     second.put(key, ());
    /// }
    /// assert_eq!(first.height(), second.height());
    /// ```
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<K, V, R> RandomBst<K, V, R> {
    /// Creates an empty tree that draws its balancing decisions from `rng`.
    #[must_use]
    pub const fn with_rng(rng: R) -> Self {
        Self { root: None, rng }
    }

    pub(crate) const fn from_parts(root: Link<K, V>, rng: R) -> Self {
        Self { root, rng }
    }

    pub(crate) fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Returns the number of entries, read from the root's stored size.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use randbst::RandomBst;
    ///
    /// let mut tree = RandomBst::new();
    /// tree.put(1, "one");
    /// tree.put(2, "two");
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        node::size_of(self.root.as_deref())
    }

    /// Alias for [`RandomBst::len`].
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Returns `true` if the tree has no root.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every entry, keeping the random source.
    pub fn clear(&mut self) {
        self.root = None;
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, R> Drop for RandomBst<K, V, R> {
    fn drop(&mut self) {
        dismantle(self.root.take());
    }
}

impl<K, V> Default for RandomBst<K, V, StdRng> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RandomBst<K, V, StdRng> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V, R: rand::Rng> Extend<(K, V)> for RandomBst<K, V, R> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

/// Two trees are equal when they hold the same entries, whatever their shape.
impl<K: PartialEq, V: PartialEq, R> PartialEq for RandomBst<K, V, R> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.in_order() == other.in_order()
    }
}

impl<K: Eq, V: Eq, R> Eq for RandomBst<K, V, R> {}

impl<K: fmt::Debug, V: fmt::Debug, R> fmt::Debug for RandomBst<K, V, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.in_order()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, R> fmt::Display for RandomBst<K, V, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self.in_order() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================
