//! Ordered key/value storage.
//!
//! The layering mirrors the design of the system:
//! - `Entry`: an ordered key+value tuple, compared by key only
//! - `AvlTree`: a generic height-balanced binary search tree
//! - `AvlMap`: key/value semantics over `AvlTree<Entry<K, V>>`

/// Key-ordered entry type stored in the tree.
///
/// Ordering and equality delegate to the key; the value is carried but
/// never compared.
pub mod entry;

/// Self-balancing binary search tree with rotation-based rebalancing.
///
/// Handles insertion, removal and lookup while maintaining the AVL
/// height-balance invariant.
pub mod avl_tree;

/// Key/value adapter over the tree.
///
/// Thin layer translating key-based calls into entry probes.
pub mod avl_map;

pub use avl_map::AvlMap;
pub use avl_tree::AvlTree;
pub use entry::Entry;
