//! AVL-backed Markov character generation library.
//!
//! This crate provides a small text-generation system built on its own
//! ordered map:
//! - A height-balanced binary search tree with rotation-based rebalancing
//! - A key/value map adapter over that tree
//! - Per-context character histograms with weighted random sampling
//! - A windowed Markov generator driving the map as its workload
//!
//! The map and the model operate purely in memory on values supplied by
//! the caller; there is no persistence layer and no parsing front-end.

/// Ordered map built on a self-balancing binary search tree.
///
/// Exposes the tree itself (`AvlTree`), the key-ordered entry type and
/// the key/value adapter (`AvlMap`).
pub mod map;

/// Character distributions and the windowed Markov generator.
pub mod model;

/// Error taxonomy shared by the map and the model.
pub mod error;
