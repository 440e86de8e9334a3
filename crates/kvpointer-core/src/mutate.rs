// SPDX-License-Identifier: MIT OR Apache-2.0
//! Point mutation at a pointer.
//!
//! All three operations address the *parent* of the pointer's final key and
//! act on that key. Only [`insert`] and [`copy_at`] ever create structure.

use crate::container::{MAX_PADDING, as_container, as_container_mut, is_container, parse_index};
use crate::pointer::{Pointer, is_truthy};
use crate::resolve::{resolve, resolve_mut};
use serde_json::{Map, Value};
use std::borrow::Cow;
use tracing::trace;

/// Outcome of [`remove`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Removal {
    /// The key held a truthy value and was deleted
    Removed,
    /// The parent resolved but the key was absent or held a falsy value
    Retained,
    /// The parent of the pointer could not be resolved
    Unresolved,
}

impl Removal {
    /// True if a value was deleted
    #[must_use]
    pub const fn is_removed(self) -> bool {
        matches!(self, Self::Removed)
    }
}

/// Set the value at `pointer`, overwriting whatever is there.
///
/// Returns false, without touching the tree, if the parent of `pointer` does
/// not resolve to an object or array, or if the key cannot address it (a
/// non-index key on an array). The root pointer cannot be replaced.
pub fn replace(root: &mut Value, pointer: &Pointer, value: Value) -> bool {
    let Some((parent, key)) = pointer.split_last() else {
        return false;
    };
    resolve_mut(root, &parent)
        .and_then(as_container_mut)
        .is_some_and(|container| container.set_key(key, value))
}

/// Set the value at `pointer` only if nothing is stored there yet.
///
/// Missing intermediate keys are created along the way: an array when the key
/// that follows is an index within [`MAX_PADDING`], an object otherwise. An
/// intermediate `null` counts as missing; any other scalar in the way is never
/// overwritten. On an array the final key `-` appends, and an index more than
/// [`MAX_PADDING`] past the end is refused.
///
/// Returns true if `value` was stored.
pub fn insert(root: &mut Value, pointer: &Pointer, value: Value) -> bool {
    let segments = pointer.segments();
    store_creating(root, pointer, value, MAX_PADDING, |depth| {
        Some(match segments.get(depth + 1).and_then(|next| parse_index(next)) {
            Some(index) if index <= MAX_PADDING => Value::Array(Vec::new()),
            _ => Value::Object(Map::new()),
        })
    })
}

/// Copy the value at `pointer` in `source` to the same pointer in `target`.
///
/// Missing intermediate containers in `target` take the kind of their
/// counterpart in `source`, so objects keyed by numbers stay objects and array
/// padding never exceeds the length of the source array. As with [`insert`],
/// nothing already stored at `pointer` is overwritten.
///
/// Returns true if the value was copied.
pub fn copy_at(target: &mut Value, source: &Value, pointer: &Pointer) -> bool {
    let Some(kinds) = container_kinds(source, pointer) else {
        return false;
    };
    let Some(value) = resolve(source, pointer) else {
        return false;
    };
    store_creating(target, pointer, value.clone(), usize::MAX, |depth| {
        kinds.get(depth).cloned()
    })
}

/// Empty containers matching each intermediate node of `pointer` in `source`
fn container_kinds(source: &Value, pointer: &Pointer) -> Option<Vec<Value>> {
    let (_, intermediate) = pointer.segments().split_last()?;
    let mut node = source;
    intermediate
        .iter()
        .map(|key| {
            node = as_container(node)?.get_key(key)?;
            match node {
                Value::Array(_) => Some(Value::Array(Vec::new())),
                Value::Object(_) => Some(Value::Object(Map::new())),
                _ => None,
            }
        })
        .collect()
}

/// Store `value` at `pointer`, creating each vacant intermediate with `fresh`.
///
/// `fresh` receives the depth of the intermediate key being filled. Nothing is
/// written unless the final store succeeds: the only creation that can fail is
/// the first one, and every later write targets a container made here.
fn store_creating<F>(
    root: &mut Value,
    pointer: &Pointer,
    value: Value,
    max_padding: usize,
    mut fresh: F,
) -> bool
where
    F: FnMut(usize) -> Option<Value>,
{
    let segments = pointer.segments();
    let Some((last, intermediate)) = segments.split_last() else {
        return false;
    };
    if !is_container(root) {
        return false;
    }

    let mut node = root;
    for (depth, key) in intermediate.iter().enumerate() {
        let Some(container) = as_container_mut(node) else {
            return false;
        };
        if container.get_key(key).is_none_or(Value::is_null) {
            let Some(created) = fresh(depth) else {
                return false;
            };
            if !container.store(key, created, max_padding) {
                return false;
            }
            trace!(%pointer, key = key.as_str(), depth, "created intermediate container");
        }
        node = match container.get_key_mut(key) {
            Some(child) if is_container(child) => child,
            _ => return false,
        };
    }

    let key: Cow<'_, str> = match &*node {
        Value::Array(items) if last == "-" => Cow::Owned(items.len().to_string()),
        _ => Cow::Borrowed(last.as_str()),
    };
    let Some(container) = as_container_mut(node) else {
        return false;
    };
    if container.contains_key(&key) {
        return false;
    }
    container.store(&key, value, max_padding)
}

/// Delete the value at `pointer` if it is truthy.
///
/// A deleted array element becomes `null`; later elements keep their indices.
pub fn remove(root: &mut Value, pointer: &Pointer) -> Removal {
    let Some((parent, key)) = pointer.split_last() else {
        return Removal::Unresolved;
    };
    let Some(parent) = resolve_mut(root, &parent) else {
        return Removal::Unresolved;
    };
    let Some(container) = as_container_mut(parent) else {
        return Removal::Retained;
    };
    if container.get_key(key).is_some_and(is_truthy) {
        container.remove_key(key);
        Removal::Removed
    } else {
        Removal::Retained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ptr(s: &str) -> Pointer {
        Pointer::parse(s)
    }

    #[test]
    fn test_replace_existing() {
        let mut doc = json!({"e": true, "d": [1, 2]});
        assert!(replace(&mut doc, &ptr("/e"), json!(false)));
        assert!(replace(&mut doc, &ptr("/d/1"), json!(20)));
        assert_eq!(doc, json!({"e": false, "d": [1, 20]}));
    }

    #[test]
    fn test_replace_adds_key_under_existing_parent() {
        let mut doc = json!({"a": {}});
        assert!(replace(&mut doc, &ptr("/a/b"), json!(1)));
        assert_eq!(doc, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_replace_requires_parent() {
        let mut doc = json!({});
        assert!(!replace(&mut doc, &ptr("/x/y"), json!(1)));
        assert_eq!(doc, json!({}));
    }

    #[test]
    fn test_replace_rejects_scalar_parent_and_root() {
        let mut doc = json!({"a": 100, "n": null});
        assert!(!replace(&mut doc, &ptr("/a/b"), json!(1)));
        assert!(!replace(&mut doc, &ptr("/n/b"), json!(1)));
        assert!(!replace(&mut doc, &ptr(""), json!(1)));
        assert_eq!(doc, json!({"a": 100, "n": null}));
    }

    #[test]
    fn test_insert_creates_objects() {
        let mut doc = json!({});
        assert!(insert(&mut doc, &ptr("/A/B/C"), json!(100)));
        assert_eq!(doc, json!({"A": {"B": {"C": 100}}}));
    }

    #[test]
    fn test_insert_creates_arrays_for_index_keys() {
        let mut doc = json!({});
        assert!(insert(&mut doc, &ptr("/A/B/0"), json!(100)));
        assert_eq!(doc, json!({"A": {"B": [100]}}));
    }

    #[test]
    fn test_insert_does_not_clobber() {
        let mut doc = json!({"D": 200});
        assert!(!insert(&mut doc, &ptr("/D"), json!(100)));
        assert_eq!(doc, json!({"D": 200}));
    }

    #[test]
    fn test_insert_does_not_descend_through_scalars() {
        let mut doc = json!({"a": 1, "s": "text"});
        assert!(!insert(&mut doc, &ptr("/a/b"), json!(2)));
        assert!(!insert(&mut doc, &ptr("/s/0"), json!(2)));
        assert_eq!(doc, json!({"a": 1, "s": "text"}));
    }

    #[test]
    fn test_insert_fills_null_intermediates() {
        let mut doc = json!({"n": null, "list": [null, 5]});
        assert!(insert(&mut doc, &ptr("/n/b"), json!(2)));
        assert!(insert(&mut doc, &ptr("/list/0/k"), json!(1)));
        assert!(!insert(&mut doc, &ptr("/n/b"), json!(3)));
        assert_eq!(doc, json!({"n": {"b": 2}, "list": [{"k": 1}, 5]}));
    }

    #[test]
    fn test_insert_keeps_null_leaf() {
        let mut doc = json!({"n": null});
        assert!(!insert(&mut doc, &ptr("/n"), json!(1)));
        assert_eq!(doc, json!({"n": null}));
    }

    #[test]
    fn test_insert_root_pointer_is_noop() {
        let mut doc = json!({});
        assert!(!insert(&mut doc, &ptr(""), json!(100)));
        assert_eq!(doc, json!({}));
    }

    #[test]
    fn test_insert_key_without_leading_slash() {
        let mut doc = json!({});
        assert!(insert(&mut doc, &ptr(" "), json!(100)));
        assert_eq!(doc, json!({" ": 100}));
    }

    #[test]
    fn test_insert_append_to_array() {
        let mut doc = json!({"list": [1]});
        assert!(insert(&mut doc, &ptr("/list/-"), json!(2)));
        assert!(insert(&mut doc, &ptr("/list/3"), json!(4)));
        assert!(!insert(&mut doc, &ptr("/list/x"), json!(5)));
        assert_eq!(doc, json!({"list": [1, 2, null, 4]}));
    }

    #[test]
    fn test_insert_into_scalar_root() {
        let mut doc = json!("text");
        assert!(!insert(&mut doc, &ptr("/a"), json!(1)));
    }

    #[test]
    fn test_remove_truthy() {
        let mut doc = json!({"A": {"B": true}});
        assert_eq!(remove(&mut doc, &ptr("/A/B")), Removal::Removed);
        assert_eq!(doc.to_string(), r#"{"A":{}}"#);
    }

    #[test]
    fn test_remove_outcomes() {
        let mut doc = json!({"a": 100, "f": false, "z": 0});
        assert_eq!(remove(&mut doc, &ptr("/missing")), Removal::Retained);
        assert_eq!(remove(&mut doc, &ptr("/f")), Removal::Retained);
        assert_eq!(remove(&mut doc, &ptr("/z")), Removal::Retained);
        assert_eq!(remove(&mut doc, &ptr("/a/b")), Removal::Retained);
        assert_eq!(remove(&mut doc, &ptr("/a/b/c")), Removal::Unresolved);
        assert_eq!(remove(&mut doc, &ptr("")), Removal::Unresolved);
        assert_eq!(doc, json!({"a": 100, "f": false, "z": 0}));
    }

    #[test]
    fn test_remove_array_element() {
        let mut doc = json!({"d": [1, 2, 3]});
        assert!(remove(&mut doc, &ptr("/d/0")).is_removed());
        assert_eq!(doc, json!({"d": [null, 2, 3]}));
        assert_eq!(remove(&mut doc, &ptr("/d/0")), Removal::Retained);
        assert_eq!(doc.pointer("/d/2"), Some(&json!(3)));
    }

    #[test]
    fn test_huge_index_is_refused() {
        let mut doc = json!({"list": []});
        assert!(!insert(&mut doc, &ptr("/list/4000000000000"), json!(1)));
        assert!(!insert(&mut doc, &ptr("/list/4000000000000/x"), json!(1)));
        assert!(!replace(&mut doc, &ptr("/list/4000000000000"), json!(1)));
        assert_eq!(doc, json!({"list": []}));
    }

    #[test]
    fn test_insert_far_index_creates_object() {
        let mut doc = json!({});
        assert!(insert(&mut doc, &ptr("/ids/4000000000000"), json!("x")));
        assert_eq!(doc, json!({"ids": {"4000000000000": "x"}}));
        let near = format!("/near/{MAX_PADDING}");
        assert!(insert(&mut doc, &ptr(&near), json!(1)));
        assert!(doc["near"].is_array());
    }

    #[test]
    fn test_copy_at_mirrors_source_kinds() {
        let source = json!({"ids": {"4000000000000": "x"}, "d": [1, 2, 3]});
        let mut target = json!({});
        assert!(copy_at(&mut target, &source, &ptr("/ids/4000000000000")));
        assert!(copy_at(&mut target, &source, &ptr("/d/2")));
        assert!(!copy_at(&mut target, &source, &ptr("/d/2")));
        assert!(!copy_at(&mut target, &source, &ptr("/missing/0")));
        assert_eq!(target, json!({"ids": {"4000000000000": "x"}, "d": [null, null, 3]}));
    }

    #[test]
    fn test_copy_at_pads_up_to_source_length() {
        let source = json!({"d": (0..2000).collect::<Vec<_>>()});
        let mut target = json!({});
        assert!(copy_at(&mut target, &source, &ptr("/d/1999")));
        assert_eq!(target["d"].as_array().map(Vec::len), Some(2000));
        assert_eq!(target["d"][1999], 1999);
    }
}
