use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

use log::debug;

use crate::Error;
use crate::raw::RawAvlTree;

/// A max-priority queue indexed by an AVL tree.
///
/// Each distinct priority is a single tree node holding a FIFO queue of the items enqueued at
/// that priority. [`dequeue`](AvlPriorityQueue::dequeue) always serves the highest priority
/// first and, within a priority, the item that was enqueued earliest. A priority's node leaves
/// the tree as soon as its last item is dequeued.
///
/// Enqueue, dequeue and removal of a whole priority level are O(log p), where p is the number
/// of distinct priorities currently queued.
///
/// # Examples
///
/// ```
/// use avl_ost::AvlPriorityQueue;
///
/// let mut queue = AvlPriorityQueue::new();
/// queue.enqueue(5, "a");
/// queue.enqueue(5, "b");
/// queue.enqueue(9, "c");
///
/// assert_eq!(queue.dequeue(), Ok("c"));
/// assert_eq!(queue.dequeue(), Ok("a"));
/// assert_eq!(queue.dequeue(), Ok("b"));
/// assert!(queue.dequeue().is_err());
/// ```
pub struct AvlPriorityQueue<P, T> {
    tree: RawAvlTree<P, VecDeque<T>>,
    len: usize,
}

impl<P, T> AvlPriorityQueue<P, T> {
    /// Makes a new, empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: RawAvlTree::new(),
            len: 0,
        }
    }

    /// Returns the total number of queued items, across all priorities.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no items are queued.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of distinct priorities that currently have items queued.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlPriorityQueue;
    ///
    /// let mut queue = AvlPriorityQueue::new();
    /// queue.enqueue(1, 'x');
    /// queue.enqueue(1, 'y');
    /// queue.enqueue(2, 'z');
    /// assert_eq!(queue.len(), 3);
    /// assert_eq!(queue.priority_levels(), 2);
    /// ```
    #[must_use]
    pub fn priority_levels(&self) -> usize {
        self.tree.len()
    }

    /// Removes every item from the queue.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    /// Returns the highest priority and the item that [`dequeue`](Self::dequeue) would return
    /// next, without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQueue`] if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::{AvlPriorityQueue, Error};
    ///
    /// let mut queue = AvlPriorityQueue::new();
    /// assert_eq!(queue.peek(), Err(Error::EmptyQueue));
    /// queue.enqueue(3, 30);
    /// queue.enqueue(7, 70);
    /// assert_eq!(queue.peek(), Ok((&7, &70)));
    /// assert_eq!(queue.len(), 2);
    /// ```
    pub fn peek(&self) -> Result<(&P, &T), Error> {
        self.tree
            .last()
            .and_then(|(priority, items)| items.front().map(|item| (priority, item)))
            .ok_or(Error::EmptyQueue)
    }

    /// Removes and returns the earliest-enqueued item of the highest priority.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQueue`] if the queue is empty.
    ///
    /// # Complexity
    ///
    /// O(log p)
    pub fn dequeue(&mut self) -> Result<T, Error> {
        let (_, items) = self.tree.last_mut().ok_or(Error::EmptyQueue)?;
        let item = items.pop_front().ok_or(Error::EmptyQueue)?;
        if items.is_empty() {
            debug!("priority level drained, removing it");
            self.tree.pop_last();
        }
        self.len -= 1;
        Ok(item)
    }
}

impl<P: Ord, T> AvlPriorityQueue<P, T> {
    /// Queues `item` behind any items already queued at `priority`.
    ///
    /// # Complexity
    ///
    /// O(log p)
    pub fn enqueue(&mut self, priority: P, item: T) {
        let created = self.tree.insert_with(priority, VecDeque::from([item]), |items, mut new| items.append(&mut new));
        if created {
            debug!("new priority level created");
        }
        self.len += 1;
    }

    /// Removes every item queued at `priority`, returning them in FIFO order. Returns an empty
    /// vector if nothing is queued at that priority.
    ///
    /// # Complexity
    ///
    /// O(log p + k), where k is the number of items removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlPriorityQueue;
    ///
    /// let mut queue = AvlPriorityQueue::new();
    /// queue.enqueue(1, "low");
    /// queue.enqueue(4, "first");
    /// queue.enqueue(4, "second");
    ///
    /// assert_eq!(queue.remove_all_of_priority(&4), ["first", "second"]);
    /// assert!(queue.remove_all_of_priority(&4).is_empty());
    /// assert_eq!(queue.dequeue(), Ok("low"));
    /// ```
    pub fn remove_all_of_priority<Q>(&mut self, priority: &Q) -> Vec<T>
    where
        P: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some((_, items)) = self.tree.remove(priority) else {
            return Vec::new();
        };
        self.len -= items.len();
        Vec::from(items)
    }

    /// Returns the number of items queued at `priority`.
    pub fn len_of_priority<Q>(&self, priority: &Q) -> usize
    where
        P: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.get(priority).map_or(0, |(_, items)| items.len())
    }
}

impl<P: Clone, T: Clone> Clone for AvlPriorityQueue<P, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            len: self.len,
        }
    }
}

impl<P, T> Default for AvlPriorityQueue<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: fmt::Debug, T: fmt::Debug> fmt::Debug for AvlPriorityQueue<P, T> {
    /// Lists priority levels from highest to lowest, in dequeue order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut levels = self.tree.iter();
        let mut map = f.debug_map();
        while let Some((priority, items)) = levels.next_back() {
            map.entry(priority, items);
        }
        map.finish()
    }
}

impl<P: Ord, T> Extend<(P, T)> for AvlPriorityQueue<P, T> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        for (priority, item) in iter {
            self.enqueue(priority, item);
        }
    }
}

impl<P: Ord, T> FromIterator<(P, T)> for AvlPriorityQueue<P, T> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}
