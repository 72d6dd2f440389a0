use core::borrow::Borrow;
use core::ops::Index;

use super::AvlTreeSet;
use crate::Rank;

impl<T> AvlTreeSet<T> {
    /// The `rank`-th smallest value, counting from zero.
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
    /// let set = AvlTreeSet::from([40, 10, 30, 20]);
    /// assert_eq!(set.get_by_rank(0), Some(&10));
    /// assert_eq!(set.get_by_rank(3), Some(&40));
    /// assert_eq!(set.get_by_rank(4), None);
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.map.get_by_rank(rank).map(|(value, ())| value)
    }
}

impl<T: Ord> AvlTreeSet<T> {
    /// Position of `value` in ascending order, or `None` if it is not stored.
    ///
    /// Inverse of [`get_by_rank`](Self::get_by_rank) for stored values.
    #[must_use]
    pub fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.rank_of(value)
    }

    /// The smallest stored value `>= target`, or `None` if every value is smaller.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeSet;
    ///
    /// let set = AvlTreeSet::from([1, 3, 5, 7, 9]);
    /// assert_eq!(set.lower_bound(&6), Some(&7));
    /// assert_eq!(set.lower_bound(&7), Some(&7));
    /// assert_eq!(set.lower_bound(&10), None);
    /// ```
    pub fn lower_bound<Q>(&self, target: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.lower_bound(target).map(|(value, ())| value)
    }

    /// The smallest stored value `> target`, or `None` if no value is larger.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeSet;
    ///
    /// let set = AvlTreeSet::from([1, 3, 5, 7, 9]);
    /// assert_eq!(set.upper_bound(&5), Some(&7));
    /// assert_eq!(set.upper_bound(&9), None);
    /// ```
    pub fn upper_bound<Q>(&self, target: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.upper_bound(target).map(|(value, ())| value)
    }

    /// How many stored values are strictly greater than `target`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// ```
    /// use avl_ost::AvlTreeSet;
    ///
    /// let set = AvlTreeSet::from([1, 3, 5, 7, 9]);
    /// assert_eq!(set.count_greater_than(&5), 2);
    /// assert_eq!(set.count_greater_than(&0), 5);
    /// ```
    pub fn count_greater_than<Q>(&self, target: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.count_greater_than(target)
    }
}

/// `set[Rank(i)]` is the `i`-th smallest value.
///
/// # Panics
///
/// Panics if `i >= set.len()`.
impl<T> Index<Rank> for AvlTreeSet<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &T {
        match self.get_by_rank(rank.0) {
            Some(value) => value,
            None => panic!("index out of bounds: rank {} in a set of {} values", rank.0, self.len()),
        }
    }
}
