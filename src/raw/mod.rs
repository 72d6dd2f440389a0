mod iter;
mod node;
mod raw_avl_tree;

pub(crate) use iter::RawIter;
pub(crate) use raw_avl_tree::RawAvlTree;
