use crate::raw::RawAvlTree;

/// Counts the inversions in a sequence: pairs of positions `(i, j)` with `i < j` whose values
/// satisfy `values[i] > values[j]`.
///
/// Values are streamed through an AVL order-statistic tree. Each value is counted against the
/// values seen *before* it, then inserted, for O(n log n) overall. Equal values are not
/// inversions; repeated values are kept distinct by their position, so a sequence like
/// `[2, 2, 1]` counts both `2`s against the `1`.
///
/// # Examples
///
/// ```
/// use avl_ost::count_inversions;
///
/// assert_eq!(count_inversions([1, 2, 3]), 0);
/// assert_eq!(count_inversions([3, 2, 1]), 3);
/// assert_eq!(count_inversions([2, 4, 1, 3, 5]), 3);
/// assert_eq!(count_inversions([2, 2, 1]), 2);
/// assert_eq!(count_inversions(Vec::<i32>::new()), 0);
/// ```
pub fn count_inversions<T, I>(values: I) -> usize
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut seen: RawAvlTree<(T, usize), ()> = RawAvlTree::new();
    let mut inversions = 0;
    for (position, value) in values.into_iter().enumerate() {
        // Keys are ordered by value first, so the keys whose value exceeds `value` form a suffix.
        inversions += seen.count_greater_by(|(earlier, _)| earlier.cmp(&value));
        seen.insert_with((value, position), (), |(), ()| {});
    }
    inversions
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    fn brute_force(values: &[i32]) -> usize {
        let mut count = 0;
        for i in 0..values.len() {
            for j in i + 1..values.len() {
                if values[i] > values[j] {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn descending_is_maximal() {
        let values: Vec<i32> = (0..100).rev().collect();
        assert_eq!(count_inversions(values), 100 * 99 / 2);
    }

    #[test]
    fn all_equal_has_none() {
        assert_eq!(count_inversions([7; 32]), 0);
    }

    proptest! {
        #[test]
        fn matches_pairwise_count(values in prop::collection::vec(-50i32..50, 0..200)) {
            prop_assert_eq!(count_inversions(values.iter().copied()), brute_force(&values));
        }
    }
}
