//! Insertion by randomized root promotion.
//!
//! Descending from the root, the new key becomes the root of the current
//! subtree with probability `1 / (size + 1)`. Among the `size + 1` keys that
//! subtree will hold, that is exactly the chance a uniformly random BST picks
//! the new key as root. Root insertion itself is an ordinary leaf insertion
//! followed by one rotation per level on the way back up.

use std::cmp::Ordering;
use std::mem;

use rand::Rng;

use super::RandomBst;
use super::node::{Link, Node, rotate_left, rotate_right};

/// Result of inserting into a subtree: the new subtree root and the value the
/// key held before, if any. A `None` previous value means a node was created.
type Insertion<K, V> = (Box<Node<K, V>>, Option<V>);

impl<K: Ord, V, R: Rng> RandomBst<K, V, R> {
    /// Inserts a key-value pair, returning the value previously stored under
    /// the key.
    ///
    /// When the key is already present its value is replaced in place and the
    /// tree's size does not change.
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
    /// let mut tree = RandomBst::new();
    /// assert_eq!(tree.put(5, "a"), None);
    /// assert_eq!(tree.put(5, "b"), Some("a"));
    /// assert_eq!(tree.get(&5), Some(&"b"));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let (root, previous) = insert_random(self.root.take(), key, value, &mut self.rng);
        self.root = Some(root);
        tracing::trace!(
            replaced = previous.is_some(),
            size = self.len(),
            "put"
        );
        previous
    }
}

/// Inserts `key` somewhere in `link`, promoting it to the subtree root with
/// probability `1 / (size + 1)` at every level it passes.
fn insert_random<K: Ord, V, R: Rng>(
    link: Link<K, V>,
    key: K,
    value: V,
    rng: &mut R,
) -> Insertion<K, V> {
    let Some(mut node) = link else {
        return (Node::leaf(key, value), None);
    };

    if rng.gen_range(0..=node.size) == 0 {
        return insert_at_root(Some(node), key, value);
    }

    match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, previous) = insert_random(node.left.take(), key, value, rng);
            node.left = Some(left);
            if previous.is_none() {
                node.size += 1;
            }
            (node, previous)
        }
        Ordering::Greater => {
            let (right, previous) = insert_random(node.right.take(), key, value, rng);
            node.right = Some(right);
            if previous.is_none() {
                node.size += 1;
            }
            (node, previous)
        }
        Ordering::Equal => {
            let previous = mem::replace(&mut node.value, value);
            (node, Some(previous))
        }
    }
}

/// Inserts `key` so that it ends up as the root of the returned subtree.
///
/// Each level recurses into the child on the key's side, which returns with
/// the key at its root, and a single rotation lifts it one level further.
/// An existing key is updated in place and lifted the same way.
fn insert_at_root<K: Ord, V>(link: Link<K, V>, key: K, value: V) -> Insertion<K, V> {
    let Some(mut node) = link else {
        return (Node::leaf(key, value), None);
    };

    match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, previous) = insert_at_root(node.left.take(), key, value);
            node.left = Some(left);
            (rotate_right(node), previous)
        }
        Ordering::Greater => {
            let (right, previous) = insert_at_root(node.right.take(), key, value);
            node.right = Some(right);
            (rotate_left(node), previous)
        }
        Ordering::Equal => {
            let previous = mem::replace(&mut node.value, value);
            (node, Some(previous))
        }
    }
}
