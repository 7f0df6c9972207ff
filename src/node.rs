//! Navigation helpers over [`serde_json::Value`] documents.
//!
//! Object members are visited in declaration order (`serde_json` is built
//! with `preserve_order`), array elements by position.

use serde_json::{Value, map};
use std::slice;

/// Iterator over the direct children of a node.
pub enum Children<'a> {
    Object(map::Iter<'a>),
    Array(slice::Iter<'a, Value>),
    Empty,
}

impl<'a> Children<'a> {
    pub fn of(node: &'a Value) -> Self {
        match node {
            Value::Object(obj) => Children::Object(obj.iter()),
            Value::Array(arr) => Children::Array(arr.iter()),
            _ => Children::Empty,
        }
    }
}

impl<'a> Iterator for Children<'a> {
    /// The member name for object children, `None` for array elements
    type Item = (Option<&'a str>, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Children::Object(it) => it.next().map(|(k, v)| (Some(k.as_str()), v)),
            Children::Array(it) => it.next().map(|v| (None, v)),
            Children::Empty => None,
        }
    }
}

/// Direct children of a node: object values or array elements.
pub fn children(node: &Value) -> impl Iterator<Item = &Value> {
    Children::of(node).map(|(_, v)| v)
}

/// Pre-order traversal of everything below a node (the node itself excluded).
pub struct Descendants<'a> {
    stack: Vec<Children<'a>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (Option<&'a str>, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;

            match top.next() {
                Some((key, value)) => {
                    if matches!(value, Value::Object(_) | Value::Array(_)) {
                        self.stack.push(Children::of(value));
                    }
                    return Some((key, value));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

pub fn descendants(node: &Value) -> Descendants<'_> {
    Descendants {
        stack: vec![Children::of(node)],
    }
}

/// Resolves a possibly negative index against an array length.
pub fn resolve_index(len: usize, index: i64) -> Option<usize> {
    if index < 0 {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        len.checked_sub(back)
    } else {
        usize::try_from(index).ok().filter(|i| *i < len)
    }
}

/// Element of an array; negative indexes count from the end (-1 = last).
pub fn element(arr: &[Value], index: i64) -> Option<&Value> {
    resolve_index(arr.len(), index).map(|i| &arr[i])
}
