//! Invariant verification for tests, stress runs, and restored snapshots.

use crate::error::{InvariantViolation, OrderSide};

use super::RandomBst;
use super::node::Node;

impl<K: Ord + Clone, V, R> RandomBst<K, V, R> {
    /// Recomputes every subtree size and checks the search ordering.
    ///
    /// Ordering is checked first, across the whole tree: every key must lie
    /// strictly between the keys of the ancestors bounding it. Sizes are
    /// checked afterwards from the leaves up, so a reported
    /// `1 + size(left) + size(right)` mismatch always uses children whose own
    /// sizes are already known to be right.
    ///
    /// Both passes use an explicit stack, so trees of any height can be
    /// checked. Never called by `put`, `get`, or `remove`.
    ///
    /// # Errors
    ///
    /// Returns the [`InvariantViolation`] describing the first defect.
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
    /// let tree: RandomBst<i32, i32> = (0..100).map(|key| (key, key)).collect();
    /// assert!(tree.verify().is_ok());
    /// ```
    pub fn verify(&self) -> Result<(), InvariantViolation<K>> {
        // Pre-order, so every child comes after its parent.
        let mut visited: Vec<&Node<K, V>> = Vec::new();
        let mut pending: Vec<(&Node<K, V>, Option<&K>, Option<&K>)> = self
            .root
            .as_deref()
            .map(|root| (root, None, None))
            .into_iter()
            .collect();

        while let Some((node, lower, upper)) = pending.pop() {
            check_bounds(node, lower, upper)?;
            pending.extend(node.right.as_deref().map(|right| (right, Some(&node.key), upper)));
            pending.extend(node.left.as_deref().map(|left| (left, lower, Some(&node.key))));
            visited.push(node);
        }

        for node in visited.into_iter().rev() {
            let expected = node.children_size();
            if node.size != expected {
                return Err(InvariantViolation::SizeMismatch {
                    key: node.key.clone(),
                    expected,
                    recorded: node.size,
                });
            }
        }
        Ok(())
    }
}

/// Checks that `node.key` lies strictly between `lower` and `upper`.
fn check_bounds<K: Ord + Clone, V>(
    node: &Node<K, V>,
    lower: Option<&K>,
    upper: Option<&K>,
) -> Result<(), InvariantViolation<K>> {
    if let Some(bound) = lower
        && node.key <= *bound
    {
        return Err(InvariantViolation::OrderViolation {
            key: node.key.clone(),
            bound: bound.clone(),
            side: OrderSide::Lower,
        });
    }
    if let Some(bound) = upper
        && node.key >= *bound
    {
        return Err(InvariantViolation::OrderViolation {
            key: node.key.clone(),
            bound: bound.clone(),
            side: OrderSide::Upper,
        });
    }
    Ok(())
}
