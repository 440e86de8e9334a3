// SPDX-License-Identifier: MIT OR Apache-2.0
//! Breadth-first traversal of JSON trees
//!
//! Visits every node level by level, hands each one to a callback together
//! with its pointer, and lets the callback stop the walk, return a value, or
//! mutate the tree while the walk is in progress:
//!
//! - [`index`] - Coordinate to pointer index built during a traversal
//! - [`cursor`] - The callback's view of the current node and the tree
//! - [`options`] - Where to start and how deep to go
//! - [`walker`] - Query and filter traversals

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]

/// Callback context for a visited node
pub mod cursor;
/// Traversal index
pub mod index;
/// Traversal options
pub mod options;
/// Query and filter traversals
pub mod walker;

pub use cursor::{Cursor, Node};
pub use index::{Coordinate, TraversalIndex};
pub use options::WalkOptions;
pub use walker::{Visit, filter, query};
