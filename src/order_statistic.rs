/// Zero-based position in ascending key order, used to index maps and sets positionally.
///
/// Indexing with a `Rank` walks cached subtree sizes, so `set[Rank(i)]` costs O(log n) like a
/// key lookup. Use [`AvlTreeSet::get_by_rank`](crate::AvlTreeSet::get_by_rank) for a
/// non-panicking variant.
///
/// ```
/// use avl_ost::{AvlTreeSet, Rank};
///
/// let set = AvlTreeSet::from([30, 10, 20]);
/// let median = set[Rank(set.len() / 2)];
/// assert_eq!(median, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(pub usize);
