use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering::{self, Equal, Greater, Less};
use core::mem;

use log::trace;

use super::iter::RawIter;
use super::node::{Link, Node};

/// The core AVL tree backing `AvlTreeMap`, `AvlTreeSet` and `AvlPriorityQueue`.
///
/// Every mutation is a recursive "rebuild on the way up": each level takes ownership of its
/// child subtree, recurses, and stores whatever (possibly rotated) subtree root comes back.
pub(crate) struct RawAvlTree<K, V> {
    /// The root node, if the tree is non-empty.
    root: Link<K, V>,
}

impl<K, V> RawAvlTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            root: None,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.len())
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        self.root = None;
    }

    /// Returns the height of the tree, or `None` if it is empty.
    pub(crate) fn height(&self) -> Option<usize> {
        self.root.as_deref().and_then(|root| usize::try_from(root.height()).ok())
    }

    /// Returns an in-order iterator over the tree.
    pub(crate) fn iter(&self) -> RawIter<'_, K, V> {
        RawIter::new(self.root.as_deref(), self.len())
    }

    /// Returns the entry with the smallest key.
    pub(crate) fn first(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    pub(crate) fn last(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key, with its value mutable.
    pub(crate) fn last_mut(&mut self) -> Option<(&K, &mut V)> {
        let mut node = self.root.as_deref_mut()?;
        while node.right.is_some() {
            node = node.right.as_deref_mut()?;
        }
        Some((&node.key, &mut node.value))
    }

    /// Removes and returns the entry with the smallest key.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let (rest, first) = take_min(root);
        self.root = rest;
        Some(first.into_entry())
    }

    /// Removes and returns the entry with the largest key.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let (rest, last) = take_max(root);
        self.root = rest;
        Some(last.into_entry())
    }

    /// Returns the entry at position `rank` in sorted order.
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let mut rank = rank;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            let left_len = node.left_len();
            match rank.cmp(&left_len) {
                Less => current = node.left.as_deref(),
                Equal => return Some((&node.key, &node.value)),
                Greater => {
                    rank -= left_len + 1;
                    current = node.right.as_deref();
                }
            }
        }
        None
    }

    /// Counts the keys for which `cmp` returns `Greater`.
    ///
    /// `cmp` compares a stored key against some target and must be monotone over the key
    /// order, so that the qualifying keys form a suffix of the sorted sequence.
    pub(crate) fn count_greater_by<F>(&self, mut cmp: F) -> usize
    where
        F: FnMut(&K) -> Ordering,
    {
        let mut count = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if cmp(&node.key) == Greater {
                // This node and its whole right subtree exceed the target.
                count += 1 + node.right_len();
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
        }
        count
    }

    /// Groups the entries by depth, root first, each level left to right.
    pub(crate) fn levels(&self) -> Vec<Vec<(&K, &V)>> {
        let mut levels = Vec::new();
        let mut queue: VecDeque<&Node<K, V>> = self.root.as_deref().into_iter().collect();

        while !queue.is_empty() {
            let width = queue.len();
            let mut level = Vec::with_capacity(width);
            for _ in 0..width {
                let Some(node) = queue.pop_front() else {
                    break;
                };
                level.push((&node.key, &node.value));
                queue.extend(node.left.as_deref());
                queue.extend(node.right.as_deref());
            }
            levels.push(level);
        }
        levels
    }

    /// Drains all key-value pairs in ascending key order.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut result = Vec::with_capacity(self.len());
        drain_into(self.root.take(), &mut result);
        result
    }
}

impl<K: Ord, V> RawAvlTree<K, V> {
    /// Inserts `key`. If the key is already present the tree is left structurally untouched
    /// and `merge` is handed the stored value and the new one.
    ///
    /// Returns true if a new node was created.
    pub(crate) fn insert_with<F>(&mut self, key: K, value: V, merge: F) -> bool
    where
        F: FnOnce(&mut V, V),
    {
        let (root, inserted) = insert(self.root.take(), key, value, merge);
        self.root = Some(root);
        inserted
    }

    /// Removes `key`, returning its entry. Removing an absent key is a no-op.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (root, removed) = remove(self.root.take(), key);
        self.root = root;
        removed
    }

    /// Returns the stored entry for `key`.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Less => current = node.left.as_deref(),
                Greater => current = node.right.as_deref(),
                Equal => return Some((&node.key, &node.value)),
            }
        }
        None
    }

    /// Returns the value stored for `key`, mutably.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut node = self.root.as_deref_mut()?;
        loop {
            match key.cmp(node.key.borrow()) {
                Less => node = node.left.as_deref_mut()?,
                Greater => node = node.right.as_deref_mut()?,
                Equal => return Some(&mut node.value),
            }
        }
    }

    /// Returns the entry with the smallest key `>= target`.
    pub(crate) fn lower_bound<Q>(&self, target: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        lower_bound(self.root.as_deref(), target).map(|node| (&node.key, &node.value))
    }

    /// Returns the entry with the smallest key `> target`.
    pub(crate) fn upper_bound<Q>(&self, target: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        upper_bound(self.root.as_deref(), target).map(|node| (&node.key, &node.value))
    }

    /// Returns the zero-based rank of `key` in sorted order.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut rank = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Less => current = node.left.as_deref(),
                Greater => {
                    rank += node.left_len() + 1;
                    current = node.right.as_deref();
                }
                Equal => return Some(rank + node.left_len()),
            }
        }
        None
    }
}

impl<K: Clone, V: Clone> Clone for RawAvlTree<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

fn insert<K, V, F>(link: Link<K, V>, key: K, value: V, merge: F) -> (Box<Node<K, V>>, bool)
where
    K: Ord,
    F: FnOnce(&mut V, V),
{
    let Some(mut node) = link else {
        return (Box::new(Node::new(key, value)), true);
    };

    let inserted = match key.cmp(&node.key) {
        Less => {
            let (left, inserted) = insert(node.left.take(), key, value, merge);
            node.left = Some(left);
            inserted
        }
        Greater => {
            let (right, inserted) = insert(node.right.take(), key, value, merge);
            node.right = Some(right);
            inserted
        }
        Equal => {
            merge(&mut node.value, value);
            return (node, false);
        }
    };

    node.update();
    (balance(node), inserted)
}

fn remove<K, V, Q>(link: Link<K, V>, key: &Q) -> (Link<K, V>, Option<(K, V)>)
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let Some(mut node) = link else {
        return (None, None);
    };

    let removed = match key.cmp(node.key.borrow()) {
        Less => {
            let (left, removed) = remove(node.left.take(), key);
            node.left = left;
            removed
        }
        Greater => {
            let (right, removed) = remove(node.right.take(), key);
            node.right = right;
            removed
        }
        Equal => match (node.left.take(), node.right.take()) {
            // Zero or one child: the surviving child takes this node's place.
            (left, None) => return (left, Some(node.into_entry())),
            (None, right) => return (right, Some(node.into_entry())),
            // Two children: the in-order successor moves into this node.
            (Some(left), Some(right)) => {
                let (right, successor) = take_min(right);
                node.left = Some(left);
                node.right = right;
                let (key, value) = successor.into_entry();
                Some((mem::replace(&mut node.key, key), mem::replace(&mut node.value, value)))
            }
        },
    };

    node.update();
    (Some(balance(node)), removed)
}

/// Detaches the minimum node of a subtree, returning the rebalanced rest and the detached node.
fn take_min<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    match node.left.take() {
        None => (node.right.take(), node),
        Some(left) => {
            let (left, min) = take_min(left);
            node.left = left;
            node.update();
            (Some(balance(node)), min)
        }
    }
}

/// Detaches the maximum node of a subtree, returning the rebalanced rest and the detached node.
fn take_max<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    match node.right.take() {
        None => (node.left.take(), node),
        Some(right) => {
            let (right, max) = take_max(right);
            node.right = right;
            node.update();
            (Some(balance(node)), max)
        }
    }
}

/// Restores the AVL property at `node`, whose children are already balanced and whose cached
/// height is current. Returns the new subtree root.
fn balance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match node.balance_factor() {
        2 => {
            if node.left.as_ref().is_some_and(|left| left.balance_factor() == -1) {
                trace!("rebalance: left-right case at height {}", node.height());
                node.left = node.left.take().map(rotate_left);
            } else {
                trace!("rebalance: left-left case at height {}", node.height());
            }
            rotate_right(node)
        }
        -2 => {
            if node.right.as_ref().is_some_and(|right| right.balance_factor() == 1) {
                trace!("rebalance: right-left case at height {}", node.height());
                node.right = node.right.take().map(rotate_right);
            } else {
                trace!("rebalance: right-right case at height {}", node.height());
            }
            rotate_left(node)
        }
        _ => node,
    }
}

/// Promotes the right child. The demoted node is updated first since it now sits below.
fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut new_root) = node.right.take() else {
        return node;
    };
    node.right = new_root.left.take();
    node.update();
    new_root.left = Some(node);
    new_root.update();
    new_root
}

/// Promotes the left child. The demoted node is updated first since it now sits below.
fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut new_root) = node.left.take() else {
        return node;
    };
    node.left = new_root.right.take();
    node.update();
    new_root.right = Some(node);
    new_root.update();
    new_root
}

fn lower_bound<'a, K, V, Q>(node: Option<&'a Node<K, V>>, target: &Q) -> Option<&'a Node<K, V>>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let node = node?;
    match target.cmp(node.key.borrow()) {
        // node.key >= target: a tighter bound may exist on the left.
        Less | Equal => lower_bound(node.left.as_deref(), target).or(Some(node)),
        Greater => lower_bound(node.right.as_deref(), target),
    }
}

fn upper_bound<'a, K, V, Q>(node: Option<&'a Node<K, V>>, target: &Q) -> Option<&'a Node<K, V>>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let node = node?;
    match target.cmp(node.key.borrow()) {
        Less => upper_bound(node.left.as_deref(), target).or(Some(node)),
        Equal | Greater => upper_bound(node.right.as_deref(), target),
    }
}

fn drain_into<K, V>(link: Link<K, V>, out: &mut Vec<(K, V)>) {
    if let Some(mut node) = link {
        drain_into(node.left.take(), out);
        let right = node.right.take();
        out.push(node.into_entry());
        drain_into(right, out);
    }
}
