// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types for kvpointer
//!
//! This crate provides the pieces every other kvpointer crate builds on:
//!
//! - [`error`] - Error type and Result alias
//! - [`pointer`] - Pointer parsing, escaping and path utilities
//! - [`container`] - Uniform key access over JSON objects and arrays
//! - [`resolve`] - Pointer resolution against a value tree
//! - [`mutate`] - Point mutation (replace, insert, remove)

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Indexable container capability for objects and arrays
pub mod container;
/// Error types for kvpointer operations
pub mod error;
/// Point mutation primitives
pub mod mutate;
/// Pointer parsing and string utilities
pub mod pointer;
/// Pointer resolution
pub mod resolve;

// Re-exports for convenience
pub use container::{
    Indexable, MAX_PADDING, as_container, as_container_mut, is_container, parse_index,
};
pub use error::{KvpError, Result};
pub use mutate::{Removal, copy_at, insert, remove, replace};
pub use pointer::{Pointer, basename, dirname, escape, is_truthy, unescape};
pub use resolve::{resolve, resolve_mut, resolve_text};
