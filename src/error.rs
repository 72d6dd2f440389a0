use thiserror::Error;

/// Errors reported by the collections in this crate.
///
/// Absence is never an error: lookups, bound queries and removals of missing keys return
/// `None` or `false`. Only queries that have no meaningful answer on an empty collection fail.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// `min`/`max` was called on a tree with no keys.
    #[error("tree is empty")]
    EmptyTree,
    /// `dequeue`/`peek` was called on a priority queue with no items.
    #[error("priority queue is empty")]
    EmptyQueue,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_messages() {
        assert_eq!(Error::EmptyTree.to_string(), "tree is empty");
        assert_eq!(Error::EmptyQueue.to_string(), "priority queue is empty");
    }
}
