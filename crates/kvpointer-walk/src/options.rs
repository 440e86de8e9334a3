// SPDX-License-Identifier: MIT OR Apache-2.0
//! Traversal options.

use kvpointer_core::Pointer;

/// Where a traversal starts and how far down it goes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Container to start from; its children are level 0
    pub base: Pointer,
    /// Deepest level to visit; `None` visits everything
    pub max_level: Option<usize>,
}

impl WalkOptions {
    /// Walk the whole document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the sub-tree at `pointer`
    #[must_use]
    pub fn at(pointer: &str) -> Self {
        Self {
            base: Pointer::parse(pointer),
            ..Self::default()
        }
    }

    /// Do not visit nodes deeper than `level`
    #[must_use]
    pub fn max_level(mut self, level: usize) -> Self {
        self.max_level = Some(level);
        self
    }

    pub(crate) fn descends_below(&self, level: usize) -> bool {
        self.max_level.is_none_or(|max| level < max)
    }
}
