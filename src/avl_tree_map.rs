use alloc::vec::{self, Vec};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use crate::raw::{RawAvlTree, RawIter};

mod order_statistic;

/// An ordered map stored in an [AVL tree].
///
/// Keys live in a binary search tree whose two subtrees differ in height by at most one at
/// every node. Insertion and removal repair the balance on their way back to the root, so the
/// height of a map holding `n` entries stays below about `1.44 * log2(n + 2)` no matter the
/// order keys arrive in. Ascending or descending input produces the same shape guarantees as
/// shuffled input.
///
/// Each node also records how many entries its subtree holds. Queries that depend on position
/// rather than identity are therefore logarithmic too: [`get_by_rank`](Self::get_by_rank),
/// [`rank_of`](Self::rank_of), [`count_greater_than`](Self::count_greater_than) and the
/// [`lower_bound`](Self::lower_bound)/[`upper_bound`](Self::upper_bound) pair.
///
/// Keys must not change their relative order while stored (for example through interior
/// mutability). Doing so cannot cause undefined behavior, but lookups on that map will return
/// unspecified results.
///
/// # Examples
///
/// ```
/// use avl_ost::AvlTreeMap;
///
/// let mut stock = AvlTreeMap::new();
/// stock.insert("pears", 4);
/// stock.insert("apples", 12);
/// stock.insert("figs", 0);
///
/// // Updating an existing key hands back the previous count.
/// assert_eq!(stock.insert("figs", 7), Some(0));
/// assert_eq!(stock["figs"], 7);
///
/// // Entries come out in key order.
/// let names: Vec<_> = stock.keys().copied().collect();
/// assert_eq!(names, ["apples", "figs", "pears"]);
///
/// // The first fruit alphabetically after "b".
/// assert_eq!(stock.lower_bound("b"), Some((&"figs", &7)));
/// ```
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
pub struct AvlTreeMap<K, V> {
    raw: RawAvlTree<K, V>,
}

/// Borrowing in-order iterator over an [`AvlTreeMap`], returned by [`AvlTreeMap::iter`].
///
/// Iterates from both ends; the two ends never yield the same entry.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    inner: RawIter<'a, K, V>,
}

/// Owning in-order iterator over an [`AvlTreeMap`], returned by its `into_iter`.
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<(K, V)>,
}

/// Iterator over the keys of an [`AvlTreeMap`], returned by [`AvlTreeMap::keys`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// Iterator over the values of an [`AvlTreeMap`] in key order, returned by
/// [`AvlTreeMap::values`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> AvlTreeMap<K, V> {
    /// Creates an empty map. No node is allocated until the first insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<u32, String> = AvlTreeMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.height(), None);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: RawAvlTree::new(),
        }
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Number of entries, read from the root's cached subtree size.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` when the map holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Height of the tree in edges: `None` when empty, `Some(0)` for a lone root.
    ///
    /// Never exceeds the largest `h` for which
    /// [`min_len_for_height(h)`](crate::min_len_for_height) is at most `self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// // Seven ascending keys fill a perfect tree of height two.
    /// let map: AvlTreeMap<i32, ()> = (0..7).map(|k| (k, ())).collect();
    /// assert_eq!(map.height(), Some(2));
    /// ```
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.raw.height()
    }

    /// The entry with the smallest key, found by following left children from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::from([(4, 'd'), (2, 'b')]);
    /// assert_eq!(map.first_key_value(), Some((&2, &'b')));
    /// assert_eq!(AvlTreeMap::<i32, char>::new().first_key_value(), None);
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first()
    }

    /// The entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last()
    }

    /// Detaches the entry with the smallest key, rebalancing the left spine it came from.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::from([(3, "c"), (1, "a"), (2, "b")]);
    /// assert_eq!(map.pop_first(), Some((1, "a")));
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_first()
    }

    /// Detaches the entry with the largest key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_last()
    }

    /// Lists the entries breadth first: one vector per depth, the root's level first and
    /// every level ordered left to right.
    ///
    /// Intended for inspecting or printing the tree's shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// // Ascending inserts rotate the middle key up to the root.
    /// let map = AvlTreeMap::from([(10, 'a'), (20, 'b'), (30, 'c')]);
    /// assert_eq!(map.levels(), [vec![(&20, &'b')], vec![(&10, &'a'), (&30, &'c')]]);
    /// ```
    #[must_use]
    pub fn levels(&self) -> Vec<Vec<(&K, &V)>> {
        self.raw.levels()
    }

    /// Walks the entries in ascending key order. Every call begins a new walk from the
    /// smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::from([(2, 'b'), (3, 'c'), (1, 'a')]);
    /// let pairs: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    /// assert_eq!(pairs, [(1, 'a'), (2, 'b'), (3, 'c')]);
    ///
    /// // Walking backwards starts at the largest key.
    /// assert_eq!(map.iter().next_back(), Some((&3, &'c')));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.raw.iter(),
        }
    }

    /// Walks the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.iter(),
        }
    }

    /// Walks the values, ordered by their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::from([("b", 2), ("a", 1)]);
    /// assert_eq!(map.values().sum::<i32>(), 3);
    /// assert_eq!(map.values().next(), Some(&1));
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.iter(),
        }
    }
}

impl<K: Ord, V> AvlTreeMap<K, V> {
    /// Looks up the value stored under `key`.
    ///
    /// `key` may be any borrowed form of `K` whose ordering agrees with `K`'s, such as `str`
    /// for `String` keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::from([(String::from("one"), 1)]);
    /// assert_eq!(map.get("one"), Some(&1));
    /// assert_eq!(map.get("two"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key).map(|(_, v)| v)
    }

    /// Like [`get`](Self::get), but also returns the stored key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Looks up the value stored under `key` for in-place modification.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let mut counts = AvlTreeMap::from([('x', 1)]);
    /// if let Some(count) = counts.get_mut(&'x') {
    ///     *count += 1;
    /// }
    /// assert_eq!(counts[&'x'], 2);
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if an entry is stored under `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key).is_some()
    }

    /// Stores `value` under `key`.
    ///
    /// A new key adds a leaf and rebalances the path back to the root; `None` is returned.
    /// An existing key keeps its node and its original key: only the value is swapped, the
    /// tree shape is untouched, and the previous value is returned.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// assert_eq!(map.insert(8, "old"), None);
    /// assert_eq!(map.insert(8, "new"), Some("old"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut replaced = None;
        self.raw.insert_with(key, value, |stored, value| replaced = Some(core::mem::replace(stored, value)));
        replaced
    }

    /// Deletes the entry stored under `key` and returns its value. A node with two children
    /// is replaced by its in-order successor. Missing keys leave the map unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::from([(5, 'e'), (3, 'c'), (8, 'h')]);
    /// assert_eq!(map.remove(&5), Some('e'));
    /// assert_eq!(map.remove(&5), None);
    /// assert_eq!(map.levels(), [vec![(&8, &'h')], vec![(&3, &'c')]]);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key).map(|(_, v)| v)
    }

    /// Like [`remove`](Self::remove), but hands back the stored key as well.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }
}

impl<K: Clone, V: Clone> Clone for AvlTreeMap<K, V> {
    /// Copies the tree node for node, keeping its shape.
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<K: Hash, V: Hash> Hash for AvlTreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        self.iter().for_each(|entry| entry.hash(state));
    }
}

/// Two maps are equal when they hold equal entries, whatever their tree shapes.
impl<K: PartialEq, V: PartialEq> PartialEq for AvlTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for AvlTreeMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for AvlTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTreeMap<K, V> {
    /// Inserts each pair in turn; later values win for repeated keys.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        for (key, value) in entries {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        let mut map = Self::new();
        map.extend(entries);
        map
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for AvlTreeMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        Self::from_iter(entries)
    }
}

impl<K, Q, V> Index<&Q> for AvlTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if no entry is stored under `key`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for AvlTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Takes the map apart in ascending key order.
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::from([(2, 'b'), (1, 'a')]);
    /// assert_eq!(map.into_iter().collect::<Vec<_>>(), [(1, 'a'), (2, 'b')]);
    /// ```
    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.inner.len();
        (remaining, Some(remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    /// Shows the entries not yet yielded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
