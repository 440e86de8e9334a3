// SPDX-License-Identifier: MIT OR Apache-2.0
//! # kvpointer
//!
//! Navigate, query and mutate JSON trees with JSON Pointers (RFC 6901).
//!
//! A [`Document`] wraps a JSON object or array and offers:
//!
//! | Operation | Description |
//! |-----------|-------------|
//! | `select` | Resolve a pointer |
//! | `replace` | Overwrite a value under an existing parent |
//! | `insert` | Store a value, creating missing objects and arrays, never overwriting |
//! | `remove` | Delete a truthy value |
//! | `query` | Breadth-first walk returning the first match |
//! | `filter` | Breadth-first walk copying every match into a new document |
//! | `apply` | Run a batch of changes and chain |
//!
//! [`basename`] and [`dirname`] work on pointer strings without a document.
//!
//! ## Example
//!
//! ```
//! use kvpointer::{Document, Visit};
//! use serde_json::json;
//!
//! let mut doc = Document::parse(r#"{"a":100,"aa":{"aaa":{"x":"ex","y":"YY"}},"d":[1,2,3]}"#)?;
//!
//! // change a value while searching for it
//! let found = doc.query(|c| {
//!     if c.key() == "y" {
//!         c.set("YYY");
//!         return Visit::Stop;
//!     }
//!     Visit::Continue
//! });
//! assert_eq!(found, Some(json!("YYY")));
//!
//! // keep only strings, at their original pointers
//! let strings = doc.filter(|c| c.value().is_some_and(|v| v.is_string()));
//! assert_eq!(strings.select("/aa/aaa/x"), Some(&json!("ex")));
//! assert_eq!(strings.select("/a"), None);
//!
//! assert_eq!(kvpointer::dirname("/aa/aaa/x"), "/aa/aaa");
//! # Ok::<(), kvpointer::KvpError>(())
//! ```

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]

mod document;

pub use document::Document;
pub use kvpointer_core::{
    KvpError, Pointer, Removal, Result, basename, dirname, escape, is_truthy, unescape,
};
pub use kvpointer_walk::{Coordinate, Cursor, Node, TraversalIndex, Visit, WalkOptions};

/// Re-export of kvpointer-core for pointer resolution and mutation primitives.
pub use kvpointer_core as core;

/// Re-export of kvpointer-walk for direct traversal over a `serde_json::Value`.
pub use kvpointer_walk as walk;
