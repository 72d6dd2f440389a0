use alloc::boxed::Box;

/// An owned, possibly empty, subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// Height of an absent subtree; a leaf has height 0.
pub(crate) const EMPTY_HEIGHT: i32 = -1;

// AVL: every node singly owns its children, no parent pointers.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    // Height of the subtree rooted here.
    height: i32,
    // Number of nodes in the subtree rooted here, for order-statistic operations.
    len: usize,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a new leaf node.
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            height: 0,
            len: 1,
            left: None,
            right: None,
        }
    }

    /// Returns the cached height of this subtree.
    #[inline]
    pub(crate) fn height(&self) -> i32 {
        self.height
    }

    /// Returns the cached number of nodes in this subtree.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of nodes in the left subtree.
    #[inline]
    pub(crate) fn left_len(&self) -> usize {
        len(self.left.as_deref())
    }

    /// Returns the number of nodes in the right subtree.
    #[inline]
    pub(crate) fn right_len(&self) -> usize {
        len(self.right.as_deref())
    }

    /// `height(left) - height(right)`.
    #[inline]
    pub(crate) fn balance_factor(&self) -> i32 {
        height(self.left.as_deref()) - height(self.right.as_deref())
    }

    /// Recomputes the cached height and length from the children.
    ///
    /// Must be called bottom-up after any change to `left` or `right`.
    #[inline]
    pub(crate) fn update(&mut self) {
        let left = self.left.as_deref();
        let right = self.right.as_deref();
        self.height = 1 + height(left).max(height(right));
        self.len = 1 + len(left) + len(right);
    }

    /// Consumes the node, returning its entry. Children are dropped, so callers
    /// detach them first.
    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

#[inline]
pub(crate) fn height<K, V>(node: Option<&Node<K, V>>) -> i32 {
    node.map_or(EMPTY_HEIGHT, Node::height)
}

#[inline]
pub(crate) fn len<K, V>(node: Option<&Node<K, V>>) -> usize {
    node.map_or(0, Node::len)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use static_assertions::assert_eq_size;

    // An empty child slot costs no more than the pointer itself.
    assert_eq_size!(Link<u64, ()>, usize);

    #[test]
    fn leaf_defaults() {
        let node = Node::new(7, "seven");
        assert_eq!(node.height(), 0);
        assert_eq!(node.len(), 1);
        assert_eq!(node.balance_factor(), 0);
        assert_eq!(height::<i32, ()>(None), EMPTY_HEIGHT);
        assert_eq!(len::<i32, ()>(None), 0);
    }

    #[test]
    fn update_recomputes_from_children() {
        let mut child = Node::new(1, ());
        child.left = Some(Box::new(Node::new(0, ())));
        child.update();

        let mut root = Node::new(2, ());
        root.left = Some(Box::new(child));
        root.update();

        assert_eq!(root.height(), 2);
        assert_eq!(root.len(), 3);
        assert_eq!(root.balance_factor(), 2);
        assert_eq!(root.left_len(), 2);
        assert_eq!(root.right_len(), 0);
        assert_eq!(root.into_entry(), (2, ()));
    }
}
