//! Queries answered from key order and cached subtree sizes rather than key identity.

use core::borrow::Borrow;
use core::ops::Index;

use super::AvlTreeMap;
use crate::Rank;

impl<K, V> AvlTreeMap<K, V> {
    /// The entry that would be at index `rank` if the entries were sorted into a slice.
    ///
    /// Descends once from the root, steering by the size of each left subtree.
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
    /// let scores = AvlTreeMap::from([(72, "kim"), (95, "ada"), (88, "lin")]);
    /// // Median score.
    /// assert_eq!(scores.get_by_rank(scores.len() / 2), Some((&88, &"lin")));
    /// assert_eq!(scores.get_by_rank(3), None);
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.get_by_rank(rank)
    }
}

impl<K: Ord, V> AvlTreeMap<K, V> {
    /// How many keys sort before `key`, provided `key` is stored.
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key)
    }

    /// The entry with the smallest key that is not less than `target`.
    ///
    /// `target` itself need not be stored. Returns `None` when every key is below it.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::from([(1, 'a'), (3, 'b'), (5, 'c')]);
    /// assert_eq!(map.lower_bound(&3), Some((&3, &'b')));
    /// assert_eq!(map.lower_bound(&4), Some((&5, &'c')));
    /// assert_eq!(map.lower_bound(&6), None);
    /// ```
    pub fn lower_bound<Q>(&self, target: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.lower_bound(target)
    }

    /// The entry with the smallest key strictly above `target`, or `None` if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::from([(1, 'a'), (3, 'b'), (5, 'c')]);
    /// assert_eq!(map.upper_bound(&3), Some((&5, &'c')));
    /// assert_eq!(map.upper_bound(&5), None);
    /// ```
    pub fn upper_bound<Q>(&self, target: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.upper_bound(target)
    }

    /// Counts the keys strictly above `target`.
    ///
    /// Whenever the descent passes a key above `target`, that key and its entire right subtree
    /// are counted at once from the cached subtree size.
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
    /// let map = AvlTreeMap::from([(1, 'a'), (3, 'b'), (5, 'c')]);
    /// assert_eq!(map.count_greater_than(&0), 3);
    /// assert_eq!(map.count_greater_than(&3), 1);
    /// assert_eq!(map.count_greater_than(&9), 0);
    /// ```
    pub fn count_greater_than<Q>(&self, target: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.count_greater_by(|key: &K| <K as Borrow<Q>>::borrow(key).cmp(target))
    }
}

/// Positional access to values: `map[Rank(i)]` is the value of the `i`-th smallest key.
///
/// # Panics
///
/// Panics if `i >= map.len()`.
impl<K, V> Index<Rank> for AvlTreeMap<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &V {
        match self.get_by_rank(rank.0) {
            Some((_, value)) => value,
            None => panic!("index out of bounds: rank {} in a map of {} entries", rank.0, self.len()),
        }
    }
}
