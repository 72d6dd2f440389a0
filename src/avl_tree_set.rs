use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::Error;
use crate::avl_tree_map::{self, AvlTreeMap, Keys};

mod order_statistic;

/// An ordered set stored in an AVL tree.
///
/// This is an [`AvlTreeMap`] with `()` values, and shares its balance and complexity
/// guarantees. A value that is already present is never inserted twice, and the attempt leaves
/// the tree exactly as it was.
///
/// Asking an empty set for its [`min`](Self::min) or [`max`](Self::max) yields
/// [`Error::EmptyTree`]. No value of `T` is reserved to mean "nothing here", so
/// `i64::MIN` and `i64::MAX` are as storable as any other key.
///
/// # Examples
///
/// ```
/// use avl_ost::AvlTreeSet;
///
/// let mut set = AvlTreeSet::new();
/// for key in [5, 3, 8, 1, 4, 7, 9] {
///     set.insert(key);
/// }
///
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 8, 9]);
/// assert!(set.height().unwrap() <= 2);
///
/// assert_eq!(set.lower_bound(&6), Some(&7));
/// assert_eq!(set.upper_bound(&5), Some(&7));
/// assert_eq!(set.count_greater_than(&4), 4);
/// ```
pub struct AvlTreeSet<T> {
    map: AvlTreeMap<T, ()>,
}

/// Borrowing ascending iterator over an [`AvlTreeSet`], returned by [`AvlTreeSet::iter`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    inner: Keys<'a, T, ()>,
}

/// Owning ascending iterator over an [`AvlTreeSet`], returned by its `into_iter`.
pub struct IntoIter<T> {
    inner: avl_tree_map::IntoIter<T, ()>,
}

impl<T> AvlTreeSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            map: AvlTreeMap::new(),
        }
    }

    /// Drops every value.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Number of stored values.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` when the set holds no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Height of the tree in edges, `None` when the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeSet;
    ///
    /// // Sorted input would make a plain search tree a chain of height 2.
    /// let set = AvlTreeSet::from([10, 20, 30]);
    /// assert_eq!(set.height(), Some(1));
    /// ```
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.map.height()
    }

    /// The smallest value, or `None` for an empty set.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(value, ())| value)
    }

    /// The largest value, or `None` for an empty set.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(value, ())| value)
    }

    /// The smallest value.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the set has no values.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::{AvlTreeSet, Error};
    ///
    /// let mut set: AvlTreeSet<i32> = AvlTreeSet::new();
    /// assert_eq!(set.min(), Err(Error::EmptyTree));
    /// set.extend([3, 1, 2]);
    /// assert_eq!(set.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&T, Error> {
        self.first().ok_or(Error::EmptyTree)
    }

    /// The largest value.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the set has no values.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::{AvlTreeSet, Error};
    ///
    /// let set = AvlTreeSet::from([i64::MIN, i64::MAX]);
    /// assert_eq!(set.max(), Ok(&i64::MAX));
    /// assert_eq!(AvlTreeSet::<i64>::new().max(), Err(Error::EmptyTree));
    /// ```
    pub fn max(&self) -> Result<&T, Error> {
        self.last().ok_or(Error::EmptyTree)
    }

    /// Removes and returns the smallest value.
    pub fn pop_first(&mut self) -> Option<T> {
        self.map.pop_first().map(|(value, ())| value)
    }

    /// Removes and returns the largest value.
    pub fn pop_last(&mut self) -> Option<T> {
        self.map.pop_last().map(|(value, ())| value)
    }

    /// Lists the values breadth first, one vector per depth starting at the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeSet;
    ///
    /// let set = AvlTreeSet::from([10, 20, 30]);
    /// assert_eq!(set.levels(), [vec![&20], vec![&10, &30]]);
    /// ```
    #[must_use]
    pub fn levels(&self) -> Vec<Vec<&T>> {
        self.map.levels().into_iter().map(|level| level.into_iter().map(|(value, ())| value).collect()).collect()
    }

    /// Walks the values in ascending order. Each call starts over from the smallest value.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeSet;
    ///
    /// let set = AvlTreeSet::from([3, 1, 2]);
    /// let mut walk = set.iter();
    /// assert_eq!(walk.next(), Some(&1));
    /// assert_eq!(walk.next_back(), Some(&3));
    ///
    /// // A new walk is unaffected by the one in progress.
    /// assert_eq!(set.iter().count(), 3);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.map.keys(),
        }
    }
}

impl<T: Ord> AvlTreeSet<T> {
    /// Returns `true` if a value equal to `value` is stored.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.contains_key(value)
    }

    /// The stored value equal to `value`, if any.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.get_key_value(value).map(|(stored, ())| stored)
    }

    /// Adds `value` and reports whether it was new.
    ///
    /// When an equal value is already stored, `false` is returned, the stored value is kept,
    /// and no rotation takes place.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeSet;
    ///
    /// let mut set = AvlTreeSet::new();
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value, ()).is_none()
    }

    /// Deletes the value equal to `value` and reports whether one was stored.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.remove(value).is_some()
    }

    /// Like [`remove`](Self::remove), but returns the stored value.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.remove_entry(value).map(|(stored, ())| stored)
    }
}

impl<T: Clone> Clone for AvlTreeSet<T> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<T: Hash> Hash for AvlTreeSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.map.hash(state);
    }
}

impl<T: PartialEq> PartialEq for AvlTreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T: Eq> Eq for AvlTreeSet<T> {}

impl<T: fmt::Debug> fmt::Debug for AvlTreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for AvlTreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for AvlTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.map.extend(values.into_iter().map(|value| (value, ())));
    }
}

impl<T: Ord> FromIterator<T> for AvlTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut set = Self::new();
        set.extend(values);
        set
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for AvlTreeSet<T> {
    fn from(values: [T; N]) -> Self {
        Self::from_iter(values)
    }
}

impl<'a, T> IntoIterator for &'a AvlTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for AvlTreeSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Moves the values out in ascending order.
    ///
    /// ```
    /// use avl_ost::AvlTreeSet;
    ///
    /// let set = AvlTreeSet::from([4, 2, 3, 1]);
    /// assert_eq!(set.into_iter().collect::<Vec<_>>(), [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.map.into_iter(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.inner).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|(value, ())| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back().map(|(value, ())| value)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    assert_impl_all!(AvlTreeSet<i32>: Send, Sync, Clone, Default);
    assert_impl_all!(Iter<'static, i32>: Send, Sync, Clone, ExactSizeIterator, DoubleEndedIterator);
    // A total order on whole sets would let `Ord::min`/`Ord::max` shadow the inherent queries.
    assert_not_impl_any!(AvlTreeSet<i32>: PartialOrd, Ord);

    #[test]
    fn min_and_max_on_owned_set() {
        let empty: AvlTreeSet<u8> = AvlTreeSet::new();
        assert_eq!(empty.min(), Err(Error::EmptyTree));
        assert_eq!(empty.max(), Err(Error::EmptyTree));

        let set = AvlTreeSet::from([7u8, 3, 9]);
        assert_eq!(set.min(), Ok(&3));
        assert_eq!(set.max(), Ok(&9));
    }

    #[test]
    fn duplicate_insert_keeps_shape() {
        let mut set: AvlTreeSet<i32> = (0..31).collect();
        let before = format!("{:?}", set.levels());
        assert!(!set.insert(15));
        assert_eq!(format!("{:?}", set.levels()), before);
        assert_eq!(set.len(), 31);
    }

    #[test]
    fn remove_two_child_root() {
        let mut set = AvlTreeSet::from([5, 3, 8]);
        assert!(set.remove(&5));
        assert_eq!(set.levels(), vec![vec![&8], vec![&3]]);
        assert_eq!(set.take(&3), Some(3));
        assert_eq!(set.take(&3), None);
    }

    #[test]
    fn debug_formats_as_set() {
        let set = AvlTreeSet::from([2, 1]);
        assert_eq!(format!("{set:?}"), "{1, 2}");
        assert_eq!(format!("{:?}", set.iter()), "Iter([1, 2])");
    }

    #[test]
    fn owned_iteration_from_both_ends() {
        let mut values = AvlTreeSet::from([4, 1, 3, 2]).into_iter();
        assert_eq!(values.len(), 4);
        assert_eq!(values.next_back(), Some(4));
        assert_eq!(values.next(), Some(1));
        assert_eq!(values.collect::<Vec<_>>(), [2, 3]);
    }
}
