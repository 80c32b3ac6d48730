//! Dotted-path resolution with default-on-miss semantics.
//!
//! A path expression addresses a value inside a [`Node`] tree: segments are
//! separated by `.`, and a segment may carry a trailing bracketed integer
//! index (`url_list[-1]`). Resolution walks the chain left to right and
//! gives up at the first failure: a missing key, a non-navigable
//! intermediate, a bad index literal, an out-of-range index, or a falsy
//! intermediate value. Callers always get either the terminal value or
//! their default, never an error.

use super::Node;

/// Resolve a path expression against a tree.
///
/// Returns `None` the instant any step of the chain fails. A falsy value
/// (empty string, zero, empty container) at any non-terminal position is
/// treated as missing; the terminal value is returned verbatim even when
/// falsy, so a present-but-zero count stays distinguishable from an absent
/// one.
pub fn resolve<'a>(root: &'a Node, path: &str) -> Option<&'a Node> {
    let mut current = root;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let (key, index) = parse_segment(segment)?;
        let mut next = current.get(key)?;
        if let Some(idx) = index {
            next = next.index(idx)?;
        }
        if segments.peek().is_some() && !next.is_truthy() {
            return None;
        }
        current = next;
    }

    Some(current)
}

/// Resolve a path to a text value, substituting `default` on any miss.
///
/// Terminal scalars are rendered as text; a terminal null or container
/// counts as a miss.
pub fn resolve_str(root: &Node, path: &str, default: &str) -> String {
    resolve(root, path)
        .and_then(Node::scalar_string)
        .unwrap_or_else(|| default.to_string())
}

/// Resolve a path to an integer, if the terminal value is one.
pub fn resolve_i64(root: &Node, path: &str) -> Option<i64> {
    resolve(root, path).and_then(Node::as_i64)
}

/// Split a segment into its key and optional bracketed index.
///
/// `urls[-1]` parses to `("urls", Some(-1))`. A non-integer index literal
/// fails the whole segment.
fn parse_segment(segment: &str) -> Option<(&str, Option<i64>)> {
    match segment.split_once('[') {
        Some((key, rest)) => {
            let literal = rest.split(']').next().unwrap_or(rest);
            let index = literal.trim().parse::<i64>().ok()?;
            Some((key, Some(index)))
        }
        None => Some((segment, None)),
    }
}
