// SPDX-License-Identifier: MIT OR Apache-2.0
//! Coordinate to pointer index.
//!
//! Every container queued for expansion gets a coordinate `level/position`
//! and an entry holding its own pointer, which is the parent pointer of each
//! child visited from it. The index lives for exactly one traversal.

use ahash::AHashMap;
use std::fmt;

/// Position of a queued container in breadth-first order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Depth; the traversal start is level 0
    pub level: usize,
    /// Position within the level
    pub position: usize,
}

impl Coordinate {
    /// The single coordinate at level 0
    pub const ROOT: Self = Self {
        level: 0,
        position: 0,
    };

    /// Coordinate `level/position`
    #[must_use]
    pub const fn new(level: usize, position: usize) -> Self {
        Self { level, position }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.level, self.position)
    }
}

/// Parent pointers by coordinate for a single traversal
#[derive(Debug, Clone, Default)]
pub struct TraversalIndex {
    parents: AHashMap<Coordinate, String>,
}

impl TraversalIndex {
    /// An index whose root coordinate points at `base` (`""` for the document root)
    #[must_use]
    pub fn rooted_at(base: impl Into<String>) -> Self {
        let mut parents = AHashMap::new();
        parents.insert(Coordinate::ROOT, base.into());
        Self { parents }
    }

    /// Record the pointer of the container queued at `coordinate`
    pub fn record(&mut self, coordinate: Coordinate, pointer: String) {
        self.parents.insert(coordinate, pointer);
    }

    /// Pointer recorded for `coordinate`
    #[must_use]
    pub fn pointer(&self, coordinate: Coordinate) -> Option<&str> {
        self.parents.get(&coordinate).map(String::as_str)
    }

    /// Number of recorded coordinates
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// True if nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
