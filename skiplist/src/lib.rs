//! A skiplist is a way of storing elements in such a way that elements can be efficiently
//! accessed, inserted and removed, all in `O(log(n))` on average.
//!
//! Conceptually, a skiplist resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where each node `[x]` has references to nodes further down the list, allowing the algorithm
//! to effectively skip ahead.
//!
//! The list in this crate is a *set*: values are unique, and inserting a value which is already
//! present is an error.  Nodes are kept in an arena owned by the list and links are arena indices,
//! so a list can be cloned into a fully independent copy which keeps every node's height.
//!
//! Values are compared with `PartialOrd`.  All values stored in one list must come from a single
//! total order; a value which cannot be ordered (such as `f64::NAN`) is rejected.

mod error;
mod lanes;
mod level_generator;
mod skiplist;
mod skipnode;

pub use crate::error::SkipListError;
pub use crate::lanes::Lanes;
pub use crate::level_generator::{tree_levels, GeometricalLevelGenerator, LevelGenerator};
pub use crate::skiplist::{Iter, SkipList};
