// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pointer parsing and string utilities.
//!
//! Pointers follow RFC 6901: `""` is the document root and every other pointer
//! is a `/`-separated list of segments in which `~1` stands for `/` and `~0`
//! stands for `~`. A pointer without a leading slash is also accepted; its
//! first segment is then a key of the root.

use serde_json::Value;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

/// Decode a single pointer segment (`~1` to `/`, then `~0` to `~`)
#[must_use]
pub fn unescape(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') {
        Cow::Owned(segment.replace("~1", "/").replace("~0", "~"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Encode a raw key for use as a pointer segment (`~` to `~0`, then `/` to `~1`)
#[must_use]
pub fn escape(key: &str) -> Cow<'_, str> {
    if key.contains(['~', '/']) {
        Cow::Owned(key.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(key)
    }
}

/// A parsed pointer: the ordered, already-unescaped keys from root to target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pointer {
    segments: SmallVec<[String; 8]>,
}

impl Pointer {
    /// The pointer to the document root
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a pointer string.
    ///
    /// `""` is the root. A leading `/` anchors the pointer at the root and does
    /// not name a key; every later segment, including an empty one, does.
    #[must_use]
    pub fn parse(pointer: &str) -> Self {
        if pointer.is_empty() {
            return Self::root();
        }
        Self::from_segments(pointer.split('/'))
    }

    /// Build a pointer from pre-split, still-escaped segments.
    ///
    /// A leading empty segment is the root anchor, exactly as produced by
    /// splitting `"/a/b"` on `/`.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut iter = segments.into_iter().peekable();
        if iter.peek().is_some_and(|s| s.as_ref().is_empty()) {
            iter.next();
        }
        Self {
            segments: iter.map(|s| unescape(s.as_ref()).into_owned()).collect(),
        }
    }

    /// Unescaped keys, root first
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of keys in the pointer
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if this pointer names the root
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final key, if any
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Split into the parent pointer and the final key; `None` for the root
    #[must_use]
    pub fn split_last(&self) -> Option<(Self, &str)> {
        let (last, rest) = self.segments.split_last()?;
        let parent = Self {
            segments: rest.iter().cloned().collect(),
        };
        Some((parent, last.as_str()))
    }

    /// Append a raw (unescaped) key
    pub fn push(&mut self, key: impl Into<String>) {
        self.segments.push(key.into());
    }

    /// A new pointer one level below this one
    #[must_use]
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut child = self.clone();
        child.push(key);
        child
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", escape(segment))?;
        }
        Ok(())
    }
}

impl From<&str> for Pointer {
    fn from(pointer: &str) -> Self {
        Self::parse(pointer)
    }
}

/// Last `/`-delimited segment of `pointer`, with `suffix` removed if present.
///
/// The suffix is only stripped when something would remain.
///
/// ```
/// use kvpointer_core::basename;
///
/// assert_eq!(basename("/usr/var/log", None), "log");
/// assert_eq!(basename("/a/b.txt", Some(".txt")), "b");
/// ```
#[must_use]
pub fn basename<'p>(pointer: &'p str, suffix: Option<&str>) -> &'p str {
    let name = pointer.rsplit_once('/').map_or(pointer, |(_, last)| last);
    match suffix {
        Some(suffix) if !suffix.is_empty() && name.len() > suffix.len() => {
            name.strip_suffix(suffix).unwrap_or(name)
        }
        _ => name,
    }
}

/// Everything before the last `/` of `pointer`; `""` (the root) if there is none.
///
/// ```
/// use kvpointer_core::dirname;
///
/// assert_eq!(dirname("/usr/var/log"), "/usr/var");
/// assert_eq!(dirname("/usr"), "");
/// ```
#[must_use]
pub fn dirname(pointer: &str) -> &str {
    pointer.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// JavaScript truthiness of a JSON value.
///
/// `null`, `false`, `0` and `""` are falsy; everything else, including empty
/// arrays and objects, is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
