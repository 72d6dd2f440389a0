//! AVL order-statistic tree collections for Rust.
//!
//! This crate provides [`AvlTreeMap`] and [`AvlTreeSet`], ordered collections backed by a
//! height-balanced binary search tree, with API shapes mirroring the standard library's
//! `BTreeMap` and `BTreeSet`, plus [`AvlPriorityQueue`], a max-priority queue built on the same
//! rotation core.
//!
//! Beyond the usual ordered-collection operations, the tree answers order-statistic queries in
//! O(log n):
//!
//! - [`lower_bound`](AvlTreeSet::lower_bound) / [`upper_bound`](AvlTreeSet::upper_bound) - the
//!   smallest key `>=` / `>` a target
//! - [`count_greater_than`](AvlTreeSet::count_greater_than) - how many keys exceed a target
//! - [`get_by_rank`](AvlTreeSet::get_by_rank) / [`rank_of`](AvlTreeSet::rank_of) - positional access
//! - [`count_inversions`] - the number of out-of-order pairs in a sequence
//!
//! # Example
//!
//! ```
//! use avl_ost::{AvlTreeSet, Rank, count_inversions};
//!
//! let mut set = AvlTreeSet::new();
//! for key in [10, 20, 30] {
//!     set.insert(key);
//! }
//!
//! // Ascending input still yields a balanced tree.
//! assert_eq!(set.height(), Some(1));
//! assert_eq!(set[Rank(0)], 10);
//!
//! assert_eq!(set.lower_bound(&15), Some(&20));
//! assert_eq!(set.upper_bound(&20), Some(&30));
//! assert_eq!(set.count_greater_than(&10), 2);
//!
//! assert_eq!(count_inversions([3, 1, 2]), 2);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Strict AVL balance** - Height stays within about `1.44 * log2(n + 2)` for any insertion order
//! - **Explicit emptiness** - `min`/`max`/`dequeue` report [`Error`] instead of sentinel values
//!
//! # Implementation
//!
//! Nodes own their children through `Box`es; there are no parent pointers. Every mutation
//! descends recursively, and each level stores whatever subtree root the recursive call hands
//! back, updating its cached height and subtree size and applying at most one single or
//! double rotation before returning. Rotation decisions are emitted through the [`log`] facade
//! at `trace` level.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod height;
mod inversions;
mod order_statistic;
mod raw;

pub mod avl_tree_map;
pub mod avl_tree_set;
pub mod priority_queue;

pub use avl_tree_map::AvlTreeMap;
pub use avl_tree_set::AvlTreeSet;
pub use error::Error;
pub use height::min_len_for_height;
pub use inversions::count_inversions;
pub use order_statistic::Rank;
pub use priority_queue::AvlPriorityQueue;
