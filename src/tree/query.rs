//! Read-only queries: key lookup, extremes, and diagnostics.

use std::borrow::Borrow;
use std::cmp::Ordering;

use super::RandomBst;
use super::node::Node;

impl<K, V, R> RandomBst<K, V, R> {
    /// Returns a reference to the value stored under `key`.
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
    /// let mut tree = RandomBst::new();
    /// tree.put("hello".to_string(), 42);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(tree.get("hello"), Some(&42));
    /// assert_eq!(tree.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// Only the value can change through the reference, so the tree's shape
    /// and sizes are untouched.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            };
        }
        None
    }

    /// Returns `true` if the tree holds a value for `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns the smallest key, or `None` on an empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use randbst::RandomBst;
    ///
    /// let tree: RandomBst<i32, ()> = [(3, ()), (1, ()), (2, ())].into_iter().collect();
    /// assert_eq!(tree.min_key(), Some(&1));
    /// ```
    #[must_use]
    pub fn min_key(&self) -> Option<&K> {
        let mut current = self.root.as_deref()?;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        Some(&current.key)
    }

    /// Returns the largest key, or `None` on an empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use randbst::RandomBst;
    ///
    /// let tree: RandomBst<i32, ()> = [(3, ()), (1, ()), (2, ())].into_iter().collect();
    /// assert_eq!(tree.max_key(), Some(&3));
    /// ```
    #[must_use]
    pub fn max_key(&self) -> Option<&K> {
        let mut current = self.root.as_deref()?;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        Some(&current.key)
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// An empty tree has height zero. This walks the whole tree and exists for
    /// diagnostics; nothing in the balancing logic consults it.
    ///
    /// # Complexity
    ///
    /// O(N)
    #[must_use]
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending: Vec<(&Node<K, V>, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, depth)) = pending.pop() {
            tallest = tallest.max(depth);
            pending.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            pending.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }
        tallest
    }

    /// Collects every entry in ascending key order.
    ///
    /// # Complexity
    ///
    /// O(N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use randbst::RandomBst;
    ///
    /// let tree: RandomBst<i32, char> = [(2, 'b'), (1, 'a')].into_iter().collect();
    /// assert_eq!(tree.in_order(), vec![(&1, &'a'), (&2, &'b')]);
    /// ```
    #[must_use]
    pub fn in_order(&self) -> Vec<(&K, &V)> {
        let mut entries = Vec::with_capacity(self.len());
        let mut pending: Vec<&Node<K, V>> = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                pending.push(node);
                current = node.left.as_deref();
            }
            let Some(node) = pending.pop() else {
                break;
            };
            entries.push((&node.key, &node.value));
            current = node.right.as_deref();
        }
        entries
    }

    /// Collects every key in ascending order.
    #[must_use]
    pub fn keys(&self) -> Vec<&K> {
        self.in_order().into_iter().map(|(key, _)| key).collect()
    }
}
