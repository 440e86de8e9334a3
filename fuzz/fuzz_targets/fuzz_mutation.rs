#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz target for point mutation.
//!
//! Input is JSON text followed by a NUL byte and a list of newline-separated
//! operations: `i<pointer>` insert, `r<pointer>` replace, `d<pointer>` remove,
//! `f<pointer>` filter. Nothing may panic, and each operation's reported
//! outcome must match the state it leaves behind.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_mutation

use kvpointer::{Document, Removal, basename, dirname};
use libfuzzer_sys::fuzz_target;
use serde_json::json;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if input.len() > 20_000 {
        return;
    }
    let (json, ops) = input.split_once('\0').unwrap_or((input, ""));
    let Ok(mut doc) = Document::parse(json) else {
        return;
    };

    for (step, line) in ops.lines().take(64).enumerate() {
        let mut chars = line.chars();
        let Some(op) = chars.next() else {
            continue;
        };
        let pointer = chars.as_str();
        let marker = json!({ "step": step });

        match op {
            'i' => {
                let before = doc.clone();
                let appends = basename(pointer, None) == "-";
                if doc.insert(pointer, marker.clone()) {
                    // `-` on an array appends, so it never resolves afterwards
                    if !appends || doc.select(dirname(pointer)).is_some_and(|v| v.is_object()) {
                        assert_eq!(doc.select(pointer), Some(&marker));
                        assert!(!doc.insert(pointer, 0));
                    }
                } else {
                    assert_eq!(doc, before, "failed insert changed the document");
                }
            }
            'r' => {
                let before = doc.clone();
                if doc.replace(pointer, marker.clone()) {
                    assert_eq!(doc.select(pointer), Some(&marker));
                } else {
                    assert_eq!(doc, before, "failed replace changed the document");
                }
            }
            'd' => {
                let before = doc.clone();
                if doc.remove(pointer) == Removal::Removed {
                    // array elements leave a null hole behind
                    assert!(doc.select(pointer).is_none_or(|v| v.is_null()));
                } else {
                    assert_eq!(doc, before, "failed remove changed the document");
                }
            }
            'f' => {
                let filtered = doc.filter_at(pointer, |node| node.level() % 2 == 1);
                assert!(filtered.as_value().is_some_and(|v| v.is_object()));
            }
            _ => {}
        }
    }

    if let Some(text) = doc.to_json() {
        assert!(Document::parse(&text).is_ok());
    }
});
