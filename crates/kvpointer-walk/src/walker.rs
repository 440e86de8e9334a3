// SPDX-License-Identifier: MIT OR Apache-2.0
//! Query and filter traversals.
//!
//! Both walk the tree breadth-first from [`WalkOptions::base`], one level at a
//! time, with an explicit queue of containers for the next level. For every
//! key of every queued container the callback receives a [`Cursor`] and
//! answers with a [`Visit`]:
//!
//! | Verdict | [`query`] | [`filter`] |
//! |---------|-----------|------------|
//! | `Continue` | descend into the node if it is a container | same |
//! | `Stop` | return the node's value | copy the node into the result |
//! | `StopWith(v)` | return `v` | copy the node into the result |
//! | `Accumulate` | return the node's value | copy the node into the result |
//!
//! Matched nodes are not descended into. Keys are read from the live tree
//! when their container is expanded, so mutations made by a callback are seen
//! by every later visit.

use crate::cursor::{Cursor, Node};
use crate::index::{Coordinate, TraversalIndex};
use crate::options::WalkOptions;
use kvpointer_core::{Pointer, as_container, copy_at, escape, is_container, resolve};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// A callback's answer for the node it was shown
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Visit {
    /// Not a match; keep going
    #[default]
    Continue,
    /// A match; the result is the node's current value
    Stop,
    /// A match; the result is the given value
    StopWith(Value),
    /// A match to collect; in a query this behaves like `Stop`
    Accumulate,
}

impl Visit {
    /// True for every verdict except `Continue`
    #[must_use]
    pub const fn is_match(&self) -> bool {
        !matches!(self, Self::Continue)
    }
}

impl From<bool> for Visit {
    fn from(matched: bool) -> Self {
        if matched { Self::Stop } else { Self::Continue }
    }
}

impl From<()> for Visit {
    fn from((): ()) -> Self {
        Self::Continue
    }
}

/// Walk the tree and return the first match.
///
/// Returns `None` if no node matched, if a callback stopped the walk before
/// anything matched, or if the base does not resolve to a container.
pub fn query<F, R>(root: &mut Value, options: &WalkOptions, visit: F) -> Option<Value>
where
    F: FnMut(&mut Cursor<'_>) -> R,
    R: Into<Visit>,
{
    Traversal::new(root, options, None).run(visit)
}

/// Walk the tree and copy every match into a fresh object at its own pointer.
///
/// The result always starts as `{}`; intermediate structure is created with
/// the same container kinds as the walked tree, see [`kvpointer_core::copy_at`].
pub fn filter<F, R>(root: &mut Value, options: &WalkOptions, visit: F) -> Value
where
    F: FnMut(&mut Cursor<'_>) -> R,
    R: Into<Visit>,
{
    let mut traversal = Traversal::new(root, options, Some(Value::Object(Map::new())));
    traversal.walk(visit);
    traversal
        .accumulator
        .unwrap_or_else(|| Value::Object(Map::new()))
}

/// Per-call traversal state; dropped when the walk ends
struct Traversal<'t, 'o> {
    root: &'t mut Value,
    options: &'o WalkOptions,
    index: TraversalIndex,
    accumulator: Option<Value>,
    visited: usize,
    levels: usize,
}

impl<'t, 'o> Traversal<'t, 'o> {
    fn new(root: &'t mut Value, options: &'o WalkOptions, accumulator: Option<Value>) -> Self {
        Self {
            root,
            options,
            index: TraversalIndex::rooted_at(options.base.to_string()),
            accumulator,
            visited: 0,
            levels: 0,
        }
    }

    fn run<F, R>(mut self, visit: F) -> Option<Value>
    where
        F: FnMut(&mut Cursor<'_>) -> R,
        R: Into<Visit>,
    {
        self.walk(visit)
    }

    fn walk<F, R>(&mut self, mut visit: F) -> Option<Value>
    where
        F: FnMut(&mut Cursor<'_>) -> R,
        R: Into<Visit>,
    {
        let result = self.walk_levels(&mut visit);
        debug!(
            base = %self.options.base,
            levels = self.levels,
            visited = self.visited,
            indexed = self.index.len(),
            matched = result.is_some(),
            "traversal finished"
        );
        result
    }

    fn walk_levels<F, R>(&mut self, visit: &mut F) -> Option<Value>
    where
        F: FnMut(&mut Cursor<'_>) -> R,
        R: Into<Visit>,
    {
        if !resolve(self.root, &self.options.base).is_some_and(is_container) {
            return None;
        }

        let mut targets = vec![Coordinate::ROOT];
        let mut level = 0;
        while !targets.is_empty() {
            self.levels = level + 1;
            let mut next = Vec::new();
            for coordinate in targets {
                let Some(parent) = self.index.pointer(coordinate).map(str::to_owned) else {
                    continue;
                };
                let parent_path = Pointer::parse(&parent);
                let Some(keys) = resolve(self.root, &parent_path)
                    .and_then(as_container)
                    .map(|container| container.keys())
                else {
                    continue;
                };

                for key in keys {
                    let path = parent_path.child(key.as_str());
                    // removed by an earlier callback
                    if resolve(self.root, &path).is_none() {
                        continue;
                    }
                    let pointer = format!("{parent}/{}", escape(&key));
                    let node = Node {
                        key,
                        pointer,
                        level,
                    };

                    let mut cursor = Cursor::new(self.root, node, path);
                    let verdict: Visit = visit(&mut cursor).into();
                    let (node, path, stopped) = cursor.into_parts();
                    self.visited += 1;

                    match (verdict, self.accumulator.as_mut()) {
                        (Visit::Continue, _) => {
                            let descend = self.options.descends_below(level)
                                && resolve(self.root, &path).is_some_and(is_container);
                            if descend {
                                let queued = Coordinate::new(level + 1, next.len());
                                self.index.record(queued, node.pointer);
                                next.push(queued);
                            }
                        }
                        (_, Some(accumulator)) => {
                            let stored = copy_at(accumulator, self.root, &path);
                            trace!(pointer = %node.pointer, stored, "accumulated match");
                        }
                        (Visit::StopWith(value), None) => return Some(value),
                        (Visit::Stop | Visit::Accumulate, None) => {
                            return resolve(self.root, &path).cloned();
                        }
                    }

                    if stopped {
                        debug!(pointer = %path, "traversal stopped by callback");
                        return None;
                    }
                }
            }
            targets = next;
            level += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "a": 100,
            "aa": {"aaa": {"x": "ex", "y": "YY"}},
            "c": "billi",
            "d": [1, 2, 3, 4, 5],
            "e": true
        })
    }

    fn visit_order(root: &mut Value, options: &WalkOptions) -> Vec<Node> {
        let mut seen = Vec::new();
        let found = query(root, options, |cursor| seen.push(cursor.node().clone()));
        assert_eq!(found, None);
        seen
    }

    #[test]
    fn test_breadth_first_order() {
        let mut doc = sample();
        let pointers: Vec<String> = visit_order(&mut doc, &WalkOptions::new())
            .into_iter()
            .map(|node| node.pointer)
            .collect();
        assert_eq!(
            pointers,
            [
                "/a", "/aa", "/c", "/d", "/e", "/aa/aaa", "/d/0", "/d/1", "/d/2", "/d/3", "/d/4",
                "/aa/aaa/x", "/aa/aaa/y"
            ]
        );
    }

    #[test]
    fn test_levels_and_keys() {
        let mut doc = sample();
        let nodes = visit_order(&mut doc, &WalkOptions::new());
        let x = nodes.iter().find(|n| n.pointer == "/aa/aaa/x").unwrap();
        assert_eq!(x.key, "x");
        assert_eq!(x.level, 2);
        let d3 = nodes.iter().find(|n| n.pointer == "/d/3").unwrap();
        assert_eq!(d3.key, "3");
        assert_eq!(d3.level, 1);
        assert!(nodes.iter().filter(|n| n.level == 0).count() == 5);
    }

    #[test]
    fn test_pointers_are_escaped() {
        let mut doc = json!({"a/b": {"m~n": 1}});
        let nodes = visit_order(&mut doc, &WalkOptions::new());
        assert_eq!(nodes[0].key, "a/b");
        assert_eq!(nodes[0].pointer, "/a~1b");
        assert_eq!(nodes[1].pointer, "/a~1b/m~0n");
    }

    #[test]
    fn test_stop_returns_current_value() {
        let mut doc = sample();
        let found = query(&mut doc, &WalkOptions::new(), |c| c.key() == "a");
        assert_eq!(found, Some(json!(100)));
    }

    #[test]
    fn test_stop_with_overrides_result() {
        let mut doc = sample();
        let found = query(&mut doc, &WalkOptions::new(), |c| {
            if c.key() == "x" {
                Visit::StopWith(json!(c.pointer()))
            } else {
                Visit::Continue
            }
        });
        assert_eq!(found, Some(json!("/aa/aaa/x")));
    }

    #[test]
    fn test_accumulate_in_query_mode_stops() {
        let mut doc = sample();
        let found = query(&mut doc, &WalkOptions::new(), |c| {
            if c.key() == "aaa" { Visit::Accumulate } else { Visit::Continue }
        });
        assert_eq!(found, Some(json!({"x": "ex", "y": "YY"})));
    }

    #[test]
    fn test_mutation_returns_updated_value() {
        let mut doc = sample();
        let found = query(&mut doc, &WalkOptions::new(), |c| {
            if c.key() == "c" {
                c.set("doggy");
                return true;
            }
            false
        });
        assert_eq!(found, Some(json!("doggy")));
        assert_eq!(doc["c"], "doggy");
    }

    #[test]
    fn test_mutation_seen_by_later_siblings() {
        let mut doc = json!({"a": 1, "b": 2, "c": 3});
        let mut seen_b = None;
        query(&mut doc, &WalkOptions::new(), |c| {
            if c.key() == "a" {
                c.replace("/b", json!({"fresh": true}));
                c.remove("/c");
            }
            if c.key() == "b" {
                seen_b = c.value().cloned();
            }
        });
        assert_eq!(seen_b, Some(json!({"fresh": true})));
        // /c was removed before its turn and is skipped; /b/fresh is visited
        assert_eq!(doc, json!({"a": 1, "b": {"fresh": true}}));
    }

    #[test]
    fn test_in_place_mutation_of_value() {
        let mut doc = sample();
        query(&mut doc, &WalkOptions::new(), |c| {
            if c.key() == "aaa" {
                if let Some(Value::Object(map)) = c.value_mut() {
                    map.insert("y".to_owned(), json!("YYY"));
                }
                return true;
            }
            false
        });
        assert_eq!(doc["aa"]["aaa"]["y"], "YYY");
    }

    #[test]
    fn test_stop_flag_ends_walk() {
        let mut doc = sample();
        let mut count = 0;
        let found = query(&mut doc, &WalkOptions::new(), |c| {
            count += 1;
            if c.key() == "c" {
                c.stop();
            }
        });
        assert_eq!(found, None);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_no_match_returns_none() {
        let mut doc = sample();
        let before = doc.clone();
        assert_eq!(query(&mut doc, &WalkOptions::new(), |_| false), None);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_sub_tree_base() {
        let mut doc = sample();
        let nodes = visit_order(&mut doc, &WalkOptions::at("/aa"));
        let pointers: Vec<&str> = nodes.iter().map(|n| n.pointer.as_str()).collect();
        assert_eq!(pointers, ["/aa/aaa", "/aa/aaa/x", "/aa/aaa/y"]);
        assert_eq!(nodes[0].level, 0);
    }

    #[test]
    fn test_base_that_is_not_a_container() {
        let mut doc = sample();
        assert!(visit_order(&mut doc, &WalkOptions::at("/a")).is_empty());
        assert!(visit_order(&mut doc, &WalkOptions::at("/nope")).is_empty());
    }

    #[test]
    fn test_scalar_root() {
        let mut doc = json!(42);
        assert!(visit_order(&mut doc, &WalkOptions::new()).is_empty());
    }

    #[test]
    fn test_max_level() {
        let mut doc = sample();
        let nodes = visit_order(&mut doc, &WalkOptions::new().max_level(0));
        assert_eq!(nodes.len(), 5);
        let nodes = visit_order(&mut doc, &WalkOptions::new().max_level(1));
        assert_eq!(nodes.len(), 11);
    }

    #[test]
    fn test_null_is_not_descended() {
        let mut doc = json!({"n": null, "o": {"k": null}});
        let nodes = visit_order(&mut doc, &WalkOptions::new());
        let pointers: Vec<&str> = nodes.iter().map(|n| n.pointer.as_str()).collect();
        assert_eq!(pointers, ["/n", "/o", "/o/k"]);
    }

    #[test]
    fn test_filter_preserves_shape() {
        let mut doc = sample();
        let result = filter(&mut doc, &WalkOptions::new(), |c| {
            c.value().is_some_and(Value::is_string)
        });
        assert_eq!(result, json!({"aa": {"aaa": {"x": "ex", "y": "YY"}}, "c": "billi"}));
    }

    #[test]
    fn test_filter_does_not_descend_into_matches() {
        let mut doc = sample();
        let mut visited = Vec::new();
        let result = filter(&mut doc, &WalkOptions::new(), |c| {
            visited.push(c.pointer().to_owned());
            c.key() == "aa"
        });
        assert_eq!(result, json!({"aa": {"aaa": {"x": "ex", "y": "YY"}}}));
        assert!(!visited.iter().any(|p| p.starts_with("/aa/")));
    }

    #[test]
    fn test_filter_array_elements() {
        let mut doc = sample();
        let result = filter(&mut doc, &WalkOptions::at("/d"), |c| {
            c.value().and_then(Value::as_i64).is_some_and(|n| n % 2 == 1)
        });
        assert_eq!(result, json!({"d": [1, null, 3, null, 5]}));
    }

    #[test]
    fn test_filter_keeps_numeric_object_keys() {
        let mut doc = json!({"ids": {"4000000000000": "x", "7": "y"}, "n": 1});
        let result = filter(&mut doc, &WalkOptions::new(), |c| {
            c.value().is_some_and(Value::is_string)
        });
        assert_eq!(result, json!({"ids": {"4000000000000": "x", "7": "y"}}));
    }

    #[test]
    fn test_removing_array_elements_during_walk() {
        let mut doc = json!({"d": [1, 2, 3, 4, 5]});
        let mut seen = Vec::new();
        query(&mut doc, &WalkOptions::new(), |c| {
            if c.level() == 1 {
                seen.push(c.pointer().to_owned());
                let pointer = c.pointer().to_owned();
                assert!(c.remove(&pointer).is_removed());
            }
        });
        assert_eq!(seen, ["/d/0", "/d/1", "/d/2", "/d/3", "/d/4"]);
        assert_eq!(doc, json!({"d": [null, null, null, null, null]}));
    }

    #[test]
    fn test_filter_without_matches() {
        let mut doc = sample();
        assert_eq!(filter(&mut doc, &WalkOptions::new(), |_| ()), json!({}));
        assert_eq!(filter(&mut doc, &WalkOptions::at("/x"), |_| true), json!({}));
    }

    #[test]
    fn test_filter_stop_flag() {
        let mut doc = sample();
        let result = filter(&mut doc, &WalkOptions::new(), |c| {
            if c.key() == "aa" {
                c.stop();
            }
            true
        });
        assert_eq!(result, json!({"a": 100, "aa": {"aaa": {"x": "ex", "y": "YY"}}}));
    }

    #[test]
    fn test_visit_conversions() {
        assert_eq!(Visit::from(true), Visit::Stop);
        assert_eq!(Visit::from(false), Visit::Continue);
        assert_eq!(Visit::from(()), Visit::Continue);
        assert!(Visit::Accumulate.is_match());
        assert!(!Visit::default().is_match());
    }

    fn count_nodes(value: &Value) -> usize {
        match value {
            Value::Object(map) => map.values().map(|v| 1 + count_nodes(v)).sum(),
            Value::Array(items) => items.iter().map(|v| 1 + count_nodes(v)).sum(),
            _ => 0,
        }
    }

    fn arb_tree() -> impl proptest::strategy::Strategy<Value = Value> {
        use proptest::prelude::*;
        let leaf = prop_oneof![Just(Value::Null), any::<i32>().prop_map(Value::from)];
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-d]", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest::proptest! {
        #[test]
        fn prop_every_node_visited_once(mut doc in arb_tree()) {
            let expected = count_nodes(&doc);
            let mut pointers = Vec::new();
            query(&mut doc, &WalkOptions::new(), |c| pointers.push(c.pointer().to_owned()));
            proptest::prop_assert_eq!(pointers.len(), expected);
            pointers.sort();
            pointers.dedup();
            proptest::prop_assert_eq!(pointers.len(), expected);
        }

        #[test]
        fn prop_levels_never_decrease(mut doc in arb_tree()) {
            let mut levels = Vec::new();
            query(&mut doc, &WalkOptions::new(), |c| levels.push(c.level()));
            proptest::prop_assert!(levels.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
