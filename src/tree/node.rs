//! Tree node and the local restructuring primitives shared by insertion and removal.

/// An owned, possibly empty subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

// =============================================================================
// Node Definition
// =============================================================================

/// Internal node structure.
///
/// `size` counts the nodes of the subtree rooted here, so it is always
/// `1 + size(left) + size(right)` once a public operation returns.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) size: usize,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a childless node of size one.
    pub(crate) fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            size: 1,
            left: None,
            right: None,
        })
    }

    /// Size recomputed from the children's stored sizes.
    pub(crate) fn children_size(&self) -> usize {
        1 + size_of(self.left.as_deref()) + size_of(self.right.as_deref())
    }

    /// Overwrites the stored size with [`Node::children_size`].
    pub(crate) fn refresh_size(&mut self) {
        self.size = self.children_size();
    }
}

/// Stored size of an optional subtree; an empty subtree has size zero.
pub(crate) fn size_of<K, V>(node: Option<&Node<K, V>>) -> usize {
    node.map_or(0, |node| node.size)
}

/// Drops a subtree one node at a time, so the call depth stays constant
/// however tall the subtree is.
pub(crate) fn dismantle<K, V>(link: Link<K, V>) {
    let mut pending: Vec<Box<Node<K, V>>> = link.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

// =============================================================================
// Rotations
// =============================================================================

/// Rotates the subtree right around `node`, lifting its left child.
///
/// Both involved nodes get their sizes recomputed from their new children.
/// A node without a left child is returned unchanged.
pub(crate) fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.refresh_size();
    pivot.right = Some(node);
    pivot.refresh_size();
    pivot
}

/// Rotates the subtree left around `node`, lifting its right child.
///
/// Mirror image of [`rotate_right`].
pub(crate) fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.refresh_size();
    pivot.left = Some(node);
    pivot.refresh_size();
    pivot
}
