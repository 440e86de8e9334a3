// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for kvpointer.
//!
//! Lookups that miss and mutations that cannot apply are not errors; they are
//! reported as `None`, `false` or [`crate::Removal`]. The only hard failure is
//! JSON text that does not parse.

use thiserror::Error;

/// Errors that can occur while wrapping or resolving JSON text
#[derive(Error, Debug)]
pub enum KvpError {
    /// The supplied JSON text was malformed
    #[error("invalid JSON input: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for kvpointer operations
pub type Result<T> = std::result::Result<T, KvpError>;
