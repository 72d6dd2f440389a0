use smallvec::SmallVec;

use super::node::Node;

// Inline capacity of the traversal stacks. A walk holds at most `height + 1` nodes, so every
// tree with fewer than `min_len_for_height(32)` (about nine million) keys stays inline; taller
// trees spill to the heap. smallvec only implements `Array` for selected lengths without its
// `const_generics` feature, and 32 is one of them.
const INLINE_STACK: usize = 32;

// Tests use a tiny stack so the heap spill path is exercised.
#[cfg(test)]
const STACK: usize = 2;
#[cfg(not(test))]
const STACK: usize = INLINE_STACK;

type Stack<'a, K, V> = SmallVec<[&'a Node<K, V>; STACK]>;

/// In-order, double-ended iterator over the nodes of a tree.
///
/// The front stack holds the path to the next ascending node, the back stack the path to the
/// next descending node. `remaining` stops the two ends from crossing.
pub(crate) struct RawIter<'a, K, V> {
    front: Stack<'a, K, V>,
    back: Stack<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> RawIter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        let mut iter = Self::empty();
        iter.remaining = len;
        push_left_spine(&mut iter.front, root);
        push_right_spine(&mut iter.back, root);
        iter
    }

    pub(crate) fn empty() -> Self {
        Self {
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.remaining
    }

    pub(crate) fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front.pop()?;
        push_left_spine(&mut self.front, node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    pub(crate) fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back.pop()?;
        push_right_spine(&mut self.back, node.left.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }
}

impl<K, V> Clone for RawIter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

fn push_left_spine<'a, K, V>(stack: &mut Stack<'a, K, V>, mut node: Option<&'a Node<K, V>>) {
    while let Some(n) = node {
        stack.push(n);
        node = n.left.as_deref();
    }
}

fn push_right_spine<'a, K, V>(stack: &mut Stack<'a, K, V>, mut node: Option<&'a Node<K, V>>) {
    while let Some(n) = node {
        stack.push(n);
        node = n.right.as_deref();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::height::min_len_for_height;
    use static_assertions::assert_impl_all;

    // The release stack length must be one smallvec accepts.
    assert_impl_all!([&'static Node<u64, ()>; INLINE_STACK]: smallvec::Array);

    #[test]
    fn inline_stack_covers_millions_of_keys() {
        assert!(min_len_for_height(INLINE_STACK) > 9_000_000);
    }
}
