/// Returns the minimum number of keys an AVL tree of the given height can hold.
///
/// A single leaf has height 0. The sparsest AVL tree of height `h` is a root over the sparsest
/// trees of heights `h - 1` and `h - 2`, so the counts follow a shifted Fibonacci sequence:
/// 1, 2, 4, 7, 12, 20, ... Equivalently, an AVL tree of `n` keys is never taller than the
/// largest `h` with `min_len_for_height(h) <= n`, which is roughly `1.44 * log2(n + 2)`.
///
/// Saturates at `usize::MAX` for heights no tree could reach.
///
/// # Examples
///
/// ```
/// use avl_ost::{AvlTreeSet, min_len_for_height};
///
/// assert_eq!(min_len_for_height(0), 1);
/// assert_eq!(min_len_for_height(3), 7);
///
/// let set: AvlTreeSet<u32> = (0..1000).collect();
/// let height = set.height().unwrap();
/// assert!(set.len() >= min_len_for_height(height));
/// ```
#[must_use]
pub fn min_len_for_height(height: usize) -> usize {
    let (mut shorter, mut current) = (0usize, 1usize);
    for _ in 0..height {
        let next = current.saturating_add(shorter).saturating_add(1);
        shorter = current;
        current = next;
    }
    current
}
