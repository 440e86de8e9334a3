#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz target for pointer resolution correctness.
//!
//! Input is a pointer on the first line followed by JSON text. The resolver
//! is compared against `serde_json::Value::pointer`, and every pointer a
//! traversal reports must select the value the traversal saw.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_pointer_resolution

use kvpointer::{Document, Pointer};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if input.len() > 50_000 {
        return;
    }
    let (pointer, json) = input.split_once('\n').unwrap_or((input, "{}"));

    // Parsing must never panic, valid or not
    let Ok(mut doc) = Document::parse(json) else {
        return;
    };
    let Some(value) = doc.as_value().cloned() else {
        return;
    };

    // serde_json only accepts "" and pointers with a leading slash
    if pointer.is_empty() || pointer.starts_with('/') {
        assert_eq!(
            doc.select(pointer),
            value.pointer(pointer),
            "resolver disagrees with serde_json for {pointer:?}"
        );
    } else {
        let _ = doc.select(pointer);
    }

    // Rendering a parsed pointer must not change what it names
    let parsed = Pointer::parse(pointer);
    assert_eq!(Pointer::parse(&parsed.to_string()), parsed);

    let mut seen: Vec<(String, Option<Value>)> = Vec::new();
    let found = doc.query(|node| seen.push((node.pointer().to_owned(), node.value().cloned())));
    assert!(found.is_none());
    for (pointer, visited) in &seen {
        assert_eq!(doc.select(pointer), visited.as_ref(), "traversal pointer {pointer:?}");
    }
});
