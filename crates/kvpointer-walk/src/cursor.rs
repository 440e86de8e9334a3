// SPDX-License-Identifier: MIT OR Apache-2.0
//! Callback context for a visited node.
//!
//! A [`Cursor`] describes the node being visited and holds the tree the walk
//! runs over, so a callback can read the node, mutate it or any other part of
//! the tree, and end the walk. Reads always see the live tree.

use kvpointer_core::{Pointer, Removal, insert, remove, replace, resolve, resolve_mut};
use serde_json::Value;

/// Description of a visited node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Property name, or array index as a decimal string
    pub key: String,
    /// Full pointer from the document root
    pub pointer: String,
    /// Depth; children of the traversal start are level 0
    pub level: usize,
}

/// The view a traversal callback gets of the current node and the tree
#[derive(Debug)]
pub struct Cursor<'t> {
    root: &'t mut Value,
    node: Node,
    path: Pointer,
    stopped: bool,
}

impl<'t> Cursor<'t> {
    pub(crate) const fn new(root: &'t mut Value, node: Node, path: Pointer) -> Self {
        Self {
            root,
            node,
            path,
            stopped: false,
        }
    }

    pub(crate) fn into_parts(self) -> (Node, Pointer, bool) {
        (self.node, self.path, self.stopped)
    }

    /// The current node's descriptor
    #[must_use]
    pub const fn node(&self) -> &Node {
        &self.node
    }

    /// The current node's key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.node.key
    }

    /// The current node's pointer
    #[must_use]
    pub fn pointer(&self) -> &str {
        &self.node.pointer
    }

    /// The current node's level
    #[must_use]
    pub const fn level(&self) -> usize {
        self.node.level
    }

    /// The current node's value, or `None` if the callback removed it
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        resolve(self.root, &self.path)
    }

    /// Mutable access to the current node's value
    pub fn value_mut(&mut self) -> Option<&mut Value> {
        resolve_mut(self.root, &self.path)
    }

    /// Resolve any pointer against the tree
    #[must_use]
    pub fn select(&self, pointer: &str) -> Option<&Value> {
        resolve(self.root, &Pointer::parse(pointer))
    }

    /// Replace the current node's value
    pub fn set(&mut self, value: impl Into<Value>) -> bool {
        replace(self.root, &self.path, value.into())
    }

    /// Replace the value at `pointer`; see [`kvpointer_core::replace`]
    pub fn replace(&mut self, pointer: &str, value: impl Into<Value>) -> bool {
        replace(self.root, &Pointer::parse(pointer), value.into())
    }

    /// Insert a value at `pointer`; see [`kvpointer_core::insert`]
    pub fn insert(&mut self, pointer: &str, value: impl Into<Value>) -> bool {
        insert(self.root, &Pointer::parse(pointer), value.into())
    }

    /// Remove the value at `pointer`; see [`kvpointer_core::remove`]
    pub fn remove(&mut self, pointer: &str) -> Removal {
        remove(self.root, &Pointer::parse(pointer))
    }

    /// End the traversal once this node's verdict has been applied
    pub const fn stop(&mut self) {
        self.stopped = true;
    }

    /// True once [`Cursor::stop`] has been called
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }
}
