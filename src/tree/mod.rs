//! Navigable tree wrapper over untyped nested platform records.
//!
//! Platform API responses arrive as arbitrarily nested JSON whose shape
//! varies between platforms, endpoint versions, and individual items. This
//! module converts such a payload into a [`Node`] tree that the rest of the
//! pipeline can walk without ever touching raw `serde_json::Value` again:
//! every map becomes a [`Node::Map`], every array a [`Node::Seq`], and every
//! scalar a leaf. Absence is expressed as `None` at the [`Node::get`] seam,
//! so no lookup can panic regardless of how malformed the input is.

mod path;

pub use path::{resolve, resolve_i64, resolve_str};

use std::collections::BTreeMap;

use serde_json::Value;

/// A single node in a wrapped record tree.
///
/// The conversion from JSON is total: any `serde_json::Value` maps onto
/// exactly one variant, and the tree is immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A JSON object.
    Map(BTreeMap<String, Node>),
    /// A JSON array.
    Seq(Vec<Node>),
    /// A string leaf.
    Str(String),
    /// An integer leaf.
    Int(i64),
    /// A floating-point leaf (also holds integers beyond the i64 range).
    Float(f64),
    /// A boolean leaf.
    Bool(bool),
    /// An explicit null leaf.
    Null,
}

impl Node {
    /// Wrap a raw JSON value into a navigable tree.
    pub fn wrap(value: &Value) -> Self {
        match value {
            Value::Object(map) => Node::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Node::wrap(v)))
                    .collect(),
            ),
            Value::Array(items) => Node::Seq(items.iter().map(Node::wrap).collect()),
            Value::String(s) => Node::Str(s.clone()),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Node::Int(i),
                None => Node::Float(n.as_f64().unwrap_or(0.0)),
            },
            Value::Bool(b) => Node::Bool(*b),
            Value::Null => Node::Null,
        }
    }

    /// Look up a key on a map node. Any other variant has no children.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Index into a sequence node. Negative indices count from the end.
    pub fn index(&self, idx: i64) -> Option<&Node> {
        let seq = self.as_seq()?;
        let len = seq.len() as i64;
        let idx = if idx < 0 { len + idx } else { idx };
        if (0..len).contains(&idx) {
            seq.get(idx as usize)
        } else {
            None
        }
    }

    /// The elements of a sequence node.
    pub fn as_seq(&self) -> Option<&[Node]> {
        match self {
            Node::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// The text of a string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The value of an integer leaf.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Whether this node counts as present under the falsy-as-missing
    /// policy: empty strings, zeros, `false`, null, and empty containers
    /// are all treated the same as an absent key.
    pub fn is_truthy(&self) -> bool {
        match self {
            Node::Map(map) => !map.is_empty(),
            Node::Seq(items) => !items.is_empty(),
            Node::Str(s) => !s.is_empty(),
            Node::Int(i) => *i != 0,
            Node::Float(f) => *f != 0.0,
            Node::Bool(b) => *b,
            Node::Null => false,
        }
    }

    /// Render a scalar leaf as text. Containers and null have no text form.
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            Node::Str(s) => Some(s.clone()),
            Node::Int(i) => Some(i.to_string()),
            Node::Float(f) => Some(f.to_string()),
            Node::Bool(b) => Some(b.to_string()),
            Node::Map(_) | Node::Seq(_) | Node::Null => None,
        }
    }
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        Node::wrap(value)
    }
}
