// SPDX-License-Identifier: MIT OR Apache-2.0
//! The [`Document`] wrapper.

use kvpointer_core::{KvpError, Pointer, Removal, Result, is_container, resolve};
use kvpointer_walk::{Cursor, Visit, WalkOptions};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::warn;

/// A JSON object or array addressed by pointers.
///
/// Wrapping anything other than an object or array yields an inert document:
/// every lookup returns `None` and every mutation reports that it did not
/// apply.
///
/// ```
/// use kvpointer::Document;
/// use serde_json::json;
///
/// let mut doc = Document::new(json!({"aa": {"aaa": {"x": "ex"}}, "d": [1, 2]}));
/// assert_eq!(doc.select("/aa/aaa/x"), Some(&json!("ex")));
///
/// assert!(doc.insert("/aa/aaa/z", 26));
/// assert!(doc.replace("/d/1", 20));
/// assert_eq!(doc.query(|c| c.key() == "z"), Some(json!(26)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    root: Option<Value>,
}

impl Document {
    /// Wrap a value; scalars and `null` give an inert document.
    ///
    /// JSON text goes through [`Document::parse`]; a `Value::String` holding
    /// JSON is still a scalar.
    #[must_use]
    pub fn new(value: Value) -> Self {
        if is_container(&value) {
            Self { root: Some(value) }
        } else {
            warn!(value = %value, "only objects and arrays can be wrapped");
            Self::empty()
        }
    }

    /// An inert document with nothing wrapped
    #[must_use]
    pub const fn empty() -> Self {
        Self { root: None }
    }

    /// Parse JSON text and wrap the result.
    ///
    /// # Errors
    ///
    /// Returns [`KvpError::Parse`] if `json` is not valid JSON text.
    pub fn parse(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::new(value))
    }

    /// The value at `pointer`
    #[must_use]
    pub fn select(&self, pointer: &str) -> Option<&Value> {
        self.select_pointer(&Pointer::parse(pointer))
    }

    /// The value at an already parsed pointer
    #[must_use]
    pub fn select_pointer(&self, pointer: &Pointer) -> Option<&Value> {
        resolve(self.root.as_ref()?, pointer)
    }

    /// Overwrite the value at `pointer`; false if its parent is not a container.
    ///
    /// No structure is created.
    pub fn replace(&mut self, pointer: &str, value: impl Into<Value>) -> bool {
        self.root.as_mut().is_some_and(|root| {
            kvpointer_core::replace(root, &Pointer::parse(pointer), value.into())
        })
    }

    /// Store a value at `pointer` unless one is already there, creating any
    /// missing intermediate objects and arrays.
    pub fn insert(&mut self, pointer: &str, value: impl Into<Value>) -> bool {
        self.root.as_mut().is_some_and(|root| {
            kvpointer_core::insert(root, &Pointer::parse(pointer), value.into())
        })
    }

    /// Delete the value at `pointer` if it is truthy
    pub fn remove(&mut self, pointer: &str) -> Removal {
        self.root.as_mut().map_or(Removal::Unresolved, |root| {
            kvpointer_core::remove(root, &Pointer::parse(pointer))
        })
    }

    /// Walk the whole document breadth-first and return the first match.
    ///
    /// See [`kvpointer_walk::walker`] for how each [`Visit`] is handled.
    /// Returns `None` when nothing matched.
    pub fn query<F, R>(&mut self, visit: F) -> Option<Value>
    where
        F: FnMut(&mut Cursor<'_>) -> R,
        R: Into<Visit>,
    {
        self.query_with(&WalkOptions::new(), visit)
    }

    /// Like [`Document::query`], starting from the sub-tree at `pointer`
    pub fn query_at<F, R>(&mut self, pointer: &str, visit: F) -> Option<Value>
    where
        F: FnMut(&mut Cursor<'_>) -> R,
        R: Into<Visit>,
    {
        self.query_with(&WalkOptions::at(pointer), visit)
    }

    /// Like [`Document::query`], with explicit options
    pub fn query_with<F, R>(&mut self, options: &WalkOptions, visit: F) -> Option<Value>
    where
        F: FnMut(&mut Cursor<'_>) -> R,
        R: Into<Visit>,
    {
        kvpointer_walk::query(self.root.as_mut()?, options, visit)
    }

    /// Copy every matching node, at its own pointer, into a new document
    pub fn filter<F, R>(&mut self, visit: F) -> Self
    where
        F: FnMut(&mut Cursor<'_>) -> R,
        R: Into<Visit>,
    {
        self.filter_with(&WalkOptions::new(), visit)
    }

    /// Like [`Document::filter`], starting from the sub-tree at `pointer`
    pub fn filter_at<F, R>(&mut self, pointer: &str, visit: F) -> Self
    where
        F: FnMut(&mut Cursor<'_>) -> R,
        R: Into<Visit>,
    {
        self.filter_with(&WalkOptions::at(pointer), visit)
    }

    /// Like [`Document::filter`], with explicit options
    pub fn filter_with<F, R>(&mut self, options: &WalkOptions, visit: F) -> Self
    where
        F: FnMut(&mut Cursor<'_>) -> R,
        R: Into<Visit>,
    {
        let matched = match self.root.as_mut() {
            Some(root) => kvpointer_walk::filter(root, options, visit),
            None => Value::Object(Map::new()),
        };
        Self::new(matched)
    }

    /// Filter that accepts every node it is shown
    #[must_use]
    pub fn filter_all(&mut self) -> Self {
        self.filter(|_| Visit::Accumulate)
    }

    /// Run `f` against this document and return it for chaining
    pub fn apply<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        f(self);
        self
    }

    /// The wrapped value
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Unwrap the value
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        self.root
    }

    /// Compact JSON text of the wrapped value
    #[must_use]
    pub fn to_json(&self) -> Option<String> {
        self.root.as_ref().map(Value::to_string)
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl FromStr for Document {
    type Err = KvpError;

    fn from_str(json: &str) -> Result<Self> {
        Self::parse(json)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::new)
    }
}
