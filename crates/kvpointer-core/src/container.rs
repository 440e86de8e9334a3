// SPDX-License-Identifier: MIT OR Apache-2.0
//! Uniform key access over the two container kinds of a JSON tree.
//!
//! Objects are keyed by property name and enumerate in insertion order.
//! Arrays are keyed by canonical decimal index and enumerate in index order.
//! Writing past the end of an array pads it with `null`, at most
//! [`MAX_PADDING`] slots at a time; deleting an element leaves a `null` hole so
//! the indices of its siblings never move.

use serde_json::{Map, Value};

/// Most `null` slots a single array write may add before the stored value
pub const MAX_PADDING: usize = 1024;

/// Ordered key enumeration plus get/set/delete by key
pub trait Indexable {
    /// Keys in enumeration order
    fn keys(&self) -> Vec<String>;

    /// Child stored under `key`
    fn get_key(&self, key: &str) -> Option<&Value>;

    /// Mutable child stored under `key`
    fn get_key_mut(&mut self, key: &str) -> Option<&mut Value>;

    /// Store `value` under `key`, padding an array with at most `max_padding`
    /// `null`s; false if `key` cannot address this container
    fn store(&mut self, key: &str, value: Value, max_padding: usize) -> bool;

    /// Store `value` under `key` with the default padding limit
    fn set_key(&mut self, key: &str, value: Value) -> bool {
        self.store(key, value, MAX_PADDING)
    }

    /// Delete and return the child stored under `key`; an array keeps a `null`
    /// in its place
    fn remove_key(&mut self, key: &str) -> Option<Value>;

    /// True if `key` is present
    fn contains_key(&self, key: &str) -> bool {
        self.get_key(key).is_some()
    }
}

impl Indexable for Map<String, Value> {
    fn keys(&self) -> Vec<String> {
        Map::keys(self).cloned().collect()
    }

    fn get_key(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }

    fn get_key_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.get_mut(key)
    }

    fn store(&mut self, key: &str, value: Value, _max_padding: usize) -> bool {
        self.insert(key.to_owned(), value);
        true
    }

    fn remove_key(&mut self, key: &str) -> Option<Value> {
        self.shift_remove(key)
    }
}

impl Indexable for Vec<Value> {
    fn keys(&self) -> Vec<String> {
        (0..self.len()).map(|i| i.to_string()).collect()
    }

    fn get_key(&self, key: &str) -> Option<&Value> {
        parse_index(key).and_then(|i| self.get(i))
    }

    fn get_key_mut(&mut self, key: &str) -> Option<&mut Value> {
        parse_index(key).and_then(|i| self.get_mut(i))
    }

    fn store(&mut self, key: &str, value: Value, max_padding: usize) -> bool {
        let Some(index) = parse_index(key) else {
            return false;
        };
        match index.checked_sub(self.len()) {
            None => self[index] = value,
            Some(gap) if gap <= max_padding => {
                // holes render as null, as they do in JSON text
                self.resize(index, Value::Null);
                self.push(value);
            }
            Some(_) => return false,
        }
        true
    }

    fn remove_key(&mut self, key: &str) -> Option<Value> {
        let slot = self.get_mut(parse_index(key)?)?;
        Some(std::mem::take(slot))
    }
}

/// Parse a canonical array index: decimal digits, no sign, no leading zeros.
#[must_use]
pub fn parse_index(key: &str) -> Option<usize> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse().ok()
}

/// True for objects and arrays; `null` and scalars are never descended into
#[must_use]
pub const fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// View a value as a container, if it is one
#[must_use]
pub fn as_container(value: &Value) -> Option<&dyn Indexable> {
    match value {
        Value::Object(map) => Some(map),
        Value::Array(items) => Some(items),
        _ => None,
    }
}

/// Mutable view of a value as a container, if it is one
pub fn as_container_mut(value: &mut Value) -> Option<&mut dyn Indexable> {
    match value {
        Value::Object(map) => Some(map),
        Value::Array(items) => Some(items),
        _ => None,
    }
}
