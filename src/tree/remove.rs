//! Removal by randomized join.
//!
//! The removed node is replaced by a join of its two children. The join picks
//! which side supplies the new root with probability proportional to subtree
//! size, so the result is again a uniformly random BST over the remaining keys.

use std::borrow::Borrow;
use std::cmp::Ordering;

use rand::Rng;

use super::RandomBst;
use super::node::{Link, Node};

impl<K: Ord, V, R: Rng> RandomBst<K, V, R> {
    /// Removes a key, returning its value if it was present.
    ///
    /// Every node on the path to the removed key has its size decremented by
    /// one. Removing an absent key returns `None` and leaves every node as it
    /// was.
    ///
    /// The key may be any borrowed form of the tree's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(log N) expected
    ///
    /// # Examples
    ///
    /// ```rust
    /// use randbst::RandomBst;
    ///
    /// let mut tree: RandomBst<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(tree.remove(&1), Some("one"));
    /// assert_eq!(tree.remove(&1), None);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, removed) = remove_from(self.root.take(), key, &mut self.rng);
        self.root = root;
        tracing::trace!(removed = removed.is_some(), size = self.len(), "remove");
        removed
    }
}

/// Removes `key` from the subtree, returning the new subtree root and the
/// removed value.
fn remove_from<K, V, Q, R>(link: Link<K, V>, key: &Q, rng: &mut R) -> (Link<K, V>, Option<V>)
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
    R: Rng,
{
    let Some(mut node) = link else {
        return (None, None);
    };

    match key.cmp(node.key.borrow()) {
        Ordering::Less => {
            let (left, removed) = remove_from(node.left.take(), key, rng);
            node.left = left;
            if removed.is_some() {
                node.size -= 1;
            }
            (Some(node), removed)
        }
        Ordering::Greater => {
            let (right, removed) = remove_from(node.right.take(), key, rng);
            node.right = right;
            if removed.is_some() {
                node.size -= 1;
            }
            (Some(node), removed)
        }
        Ordering::Equal => {
            let Node {
                value, left, right, ..
            } = *node;
            (join(left, right, rng), Some(value))
        }
    }
}

/// Merges two subtrees where every key of `left` is less than every key of
/// `right`.
///
/// The left root wins with probability `size(left) / (size(left) + size(right))`;
/// the losing side is joined recursively into the winner's inner child.
fn join<K, V, R: Rng>(left: Link<K, V>, right: Link<K, V>, rng: &mut R) -> Link<K, V> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(mut left), Some(mut right)) => {
            let total = left.size + right.size;
            if rng.gen_range(0..total) < left.size {
                left.right = join(left.right.take(), Some(right), rng);
                left.size = total;
                Some(left)
            } else {
                right.left = join(Some(left), right.left.take(), rng);
                right.size = total;
                Some(right)
            }
        }
    }
}
