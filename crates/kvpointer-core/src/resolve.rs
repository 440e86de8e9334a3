// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pointer resolution.
//!
//! Resolution walks the pointer's keys left to right and stops at the first
//! key that is missing. Scalar and `null` roots never resolve, not even the
//! root pointer.

use crate::container::{as_container, as_container_mut};
use crate::error::Result;
use crate::pointer::Pointer;
use serde_json::Value;

/// Resolve `pointer` against `root`; `None` if any key along the way is missing
#[must_use]
pub fn resolve<'v>(root: &'v Value, pointer: &Pointer) -> Option<&'v Value> {
    as_container(root)?;
    pointer
        .segments()
        .iter()
        .try_fold(root, |node, key| as_container(node)?.get_key(key))
}

/// Mutable variant of [`resolve`]
pub fn resolve_mut<'v>(root: &'v mut Value, pointer: &Pointer) -> Option<&'v mut Value> {
    as_container(root)?;
    pointer
        .segments()
        .iter()
        .try_fold(root, |node, key| as_container_mut(node)?.get_key_mut(key))
}

/// Parse `json` and resolve `pointer` against it, returning an owned copy.
///
/// # Errors
///
/// Returns [`crate::KvpError::Parse`] if `json` is not valid JSON text.
pub fn resolve_text(json: &str, pointer: &Pointer) -> Result<Option<Value>> {
    let root: Value = serde_json::from_str(json)?;
    Ok(resolve(&root, pointer).cloned())
}
